#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Local;
use uuid::Uuid;

use super::Author;

pub const WELCOME_MESSAGE_ID: &str = "welcome-msg";
pub const WELCOME_MESSAGE: &str = "Hi, I'm Agent Pugo Hilion! I'm a social AI agent fine-tuned on Hugo Philion's tweets. How can I assist you today?";

/// Read receipt of a message. Variants are ordered so a status can only be
/// advanced forward.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum MessageStatus {
    Sending,
    Sent,
    Delivered,
    Read,
}

#[derive(Clone, Debug)]
pub struct Message {
    pub id: String,
    pub author: Author,
    pub text: String,
    pub timestamp: DateTime<Local>,
    status: MessageStatus,
    is_new: bool,
}

impl Message {
    pub fn new(author: Author, text: &str) -> Message {
        return Message::new_at(author, text, Local::now());
    }

    pub fn new_at(author: Author, text: &str, timestamp: DateTime<Local>) -> Message {
        let mut status = MessageStatus::Delivered;
        if author == Author::User {
            status = MessageStatus::Sending;
        }

        return Message {
            id: Message::create_id(&timestamp),
            author,
            text: text.to_string(),
            timestamp,
            status,
            is_new: true,
        };
    }

    pub fn welcome() -> Message {
        let mut message = Message::new(Author::Bot, WELCOME_MESSAGE);
        message.id = WELCOME_MESSAGE_ID.to_string();
        message.is_new = false;

        return message;
    }

    /// Creation time in milliseconds plus a random discriminator, so two
    /// messages created within the same millisecond never share an id.
    pub fn create_id(timestamp: &DateTime<Local>) -> String {
        let discriminator = Uuid::new_v4()
            .to_string()
            .split('-')
            .next()
            .unwrap_or_default()
            .to_string();

        return format!("msg-{}-{discriminator}", timestamp.timestamp_millis());
    }

    pub fn status(&self) -> MessageStatus {
        return self.status;
    }

    pub fn is_new(&self) -> bool {
        return self.is_new;
    }

    /// Moves the status forward. Returns false, leaving the message untouched,
    /// when `status` is not ahead of the current one.
    pub fn advance(&mut self, status: MessageStatus) -> bool {
        if status <= self.status {
            return false;
        }

        self.status = status;
        return true;
    }

    pub fn settle(&mut self) {
        self.is_new = false;
    }
}
