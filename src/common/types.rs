use chrono::{DateTime, Local};
use uuid::Uuid;

/// Who wrote a message. The view picks the bubble shape from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    Me,
    Peer,
}

/// Domain model for a single chat message.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub author: Author,
    pub sender_name: String,
    pub text: String,
    pub timestamp: DateTime<Local>,
    /// Only self-authored messages are ever marked delivered.
    pub delivered: bool,
}

impl ChatMessage {
    pub fn outgoing(sender_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            author: Author::Me,
            sender_name: sender_name.into(),
            text: text.into(),
            timestamp: Local::now(),
            delivered: true,
        }
    }

    pub fn incoming(sender_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            author: Author::Peer,
            sender_name: sender_name.into(),
            text: text.into(),
            timestamp: Local::now(),
            delivered: false,
        }
    }

    /// Backdate (or postdate) a message, used for the seeded conversation.
    pub fn at(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn is_from_me(&self) -> bool {
        self.author == Author::Me
    }

    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}
