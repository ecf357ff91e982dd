use tokio::sync::mpsc;

use crate::common::ChatMessage;

/// Append-only, ordered log of the conversation. Insertion order is the
/// display order; nothing is ever removed or rewritten.
#[derive(Default)]
pub struct Timeline {
    messages: Vec<ChatMessage>,
    subscribers: Vec<mpsc::UnboundedSender<usize>>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing conversation. Seeded messages do not notify
    /// subscribers since nobody can be subscribed yet.
    pub fn with_history(history: Vec<ChatMessage>) -> Self {
        Self {
            messages: history,
            subscribers: Vec::new(),
        }
    }

    /// Push a message to the end and return its position.
    pub fn append(&mut self, message: ChatMessage) -> usize {
        debug_assert!(!message.text.trim().is_empty());

        let index = self.messages.len();
        self.messages.push(message);
        self.subscribers.retain(|tx| tx.send(index).is_ok());
        index
    }

    pub fn all(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Receive the index of every message appended from now on.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<usize> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }
}
