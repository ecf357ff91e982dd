//! Canned content for the demo conversation.

use chrono::{Duration, Local};

use crate::common::ChatMessage;

pub const SELF_NAME: &str = "Du";
pub const PEER_NAME: &str = "Anna Schmidt";
pub const REPLY_DELAY_MS: u64 = 2000;

pub const CANNED_REPLIES: [&str; 8] = [
    "Das klingt interessant! Erzähl mir mehr davon 😊",
    "Auf jeden Fall! Das machen wir 👍",
    "Hmm, das muss ich mir überlegen...",
    "Perfekt! Ich freue mich schon darauf! ✨",
    "Oh wow, das hätte ich nicht gedacht! 😮",
    "Ja genau, das sehe ich genauso!",
    "Das ist eine super Idee! 💡",
    "Haha, du bist echt witzig! 😄",
];

pub fn default_replies() -> Vec<String> {
    CANNED_REPLIES.iter().map(|reply| reply.to_string()).collect()
}

/// The three messages the window opens with, dated a little under half an
/// hour ago.
pub fn seed_conversation(self_name: &str, peer_name: &str) -> Vec<ChatMessage> {
    let now = Local::now();
    vec![
        ChatMessage::incoming(peer_name, "Hey! Wie geht's dir denn? 😊")
            .at(now - Duration::minutes(28)),
        ChatMessage::outgoing(self_name, "Hallo Anna! Mir geht's super, danke! Und dir?")
            .at(now - Duration::minutes(27)),
        ChatMessage::incoming(
            peer_name,
            "Mir auch! Hast du Lust heute Abend ins Kino zu gehen? Der neue Marvel Film läuft 🎬",
        )
        .at(now - Duration::minutes(25)),
    ]
}
