#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use crate::domain::models::Author;
use crate::domain::models::BackendPrompt;
use crate::domain::models::BackendResponse;
use crate::domain::models::BackendStatus;
use crate::domain::models::Message;
use crate::domain::models::MessageStatus;
use crate::domain::models::SessionState;

pub const CONFIRM_KEYWORD: &str = "CONFIRM";
pub const TRANSACTION_CANCELLED: &str = "Transaction cancelled. How else can I help you?";

/// What the UI has to do after a message was accepted.
#[derive(Debug, PartialEq, Eq)]
pub struct Submission {
    /// The user message that was appended.
    pub message_id: String,
    /// Set when the backend has to be contacted.
    pub request: Option<BackendPrompt>,
    /// Set when a bot reply was produced locally, without the backend.
    pub reply_id: Option<String>,
}

/// Owns the message log and drives the send/receive cycle, including the
/// two step confirmation of transaction previews.
#[derive(Default)]
pub struct ConversationController {
    state: SessionState,
}

impl ConversationController {
    pub fn session(&self) -> &SessionState {
        return &self.state;
    }

    pub fn accepts_input(&self) -> bool {
        return !self.state.is_busy() && self.state.backend_status() != BackendStatus::Offline;
    }

    pub fn submit(&mut self, text: &str) -> Option<Submission> {
        let text = text.trim();
        if text.is_empty() || self.state.is_busy() {
            return None;
        }

        self.state.set_busy(true);
        let message = Message::new(Author::User, text);
        let message_id = message.id.to_string();
        self.state.append(message);

        if !self.state.awaiting_confirmation() {
            return Some(Submission {
                request: Some(BackendPrompt::new(&message_id, text)),
                message_id,
                reply_id: None,
            });
        }

        if text.to_uppercase() == CONFIRM_KEYWORD {
            if let Some(transaction) = self.state.take_pending_transaction() {
                tracing::info!(message_id = message_id.as_str(), "Transaction confirmed, resending");
                return Some(Submission {
                    request: Some(BackendPrompt::new(&message_id, &transaction)),
                    message_id,
                    reply_id: None,
                });
            }
        }

        tracing::info!(message_id = message_id.as_str(), "Transaction cancelled");
        self.state.clear_confirmation();
        let reply_id = self.reply(&message_id, TRANSACTION_CANCELLED);

        return Some(Submission {
            message_id,
            request: None,
            reply_id: Some(reply_id),
        });
    }

    /// Applies the outcome of a backend send and appends the reply. Returns the
    /// id of the appended bot message.
    pub fn receive(&mut self, response: BackendResponse) -> String {
        self.set_backend_status(response.status);
        if response.transaction_preview {
            tracing::info!(
                message_id = response.message_id.as_str(),
                "Awaiting transaction confirmation"
            );
            self.state.await_confirmation(&response.prompt);
        }

        return self.reply(&response.message_id, &response.text);
    }

    pub fn mark_sent(&mut self, id: &str) {
        self.state.advance_status(id, MessageStatus::Sent);
        self.state.settle(id);
    }

    pub fn settle(&mut self, id: &str) {
        self.state.settle(id);
    }

    pub fn set_backend_status(&mut self, status: BackendStatus) {
        if self.state.set_backend_status(status) {
            tracing::info!(status = status.label(), "Backend status changed");
        }
    }

    fn reply(&mut self, message_id: &str, text: &str) -> String {
        let reply = Message::new(Author::Bot, text);
        let reply_id = reply.id.to_string();

        self.state.append(reply);
        self.state.advance_status(message_id, MessageStatus::Read);
        self.state.set_busy(false);

        return reply_id;
    }
}
