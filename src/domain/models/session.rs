#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use super::BackendStatus;
use super::Message;
use super::MessageStatus;

/// Everything the chat view knows for as long as it runs. Nothing is persisted;
/// a restart is the only way to clear it.
#[derive(Debug)]
pub struct SessionState {
    messages: Vec<Message>,
    awaiting_confirmation: bool,
    pending_transaction: Option<String>,
    backend_status: BackendStatus,
    busy: bool,
}

impl Default for SessionState {
    fn default() -> SessionState {
        return SessionState {
            messages: vec![Message::welcome()],
            awaiting_confirmation: false,
            pending_transaction: None,
            backend_status: BackendStatus::Checking,
            busy: false,
        };
    }
}

impl SessionState {
    pub fn messages(&self) -> &[Message] {
        return &self.messages;
    }

    pub fn message(&self, id: &str) -> Option<&Message> {
        return self.messages.iter().find(|message| return message.id == id);
    }

    pub fn awaiting_confirmation(&self) -> bool {
        return self.awaiting_confirmation;
    }

    pub fn pending_transaction(&self) -> Option<&str> {
        return self.pending_transaction.as_deref();
    }

    pub fn backend_status(&self) -> BackendStatus {
        return self.backend_status;
    }

    pub fn is_busy(&self) -> bool {
        return self.busy;
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn advance_status(&mut self, id: &str, status: MessageStatus) -> bool {
        if let Some(message) = self.messages.iter_mut().find(|m| return m.id == id) {
            return message.advance(status);
        }

        return false;
    }

    pub fn settle(&mut self, id: &str) -> bool {
        if let Some(message) = self.messages.iter_mut().find(|m| return m.id == id) {
            message.settle();
            return true;
        }

        return false;
    }

    /// Returns true when the status changed.
    pub fn set_backend_status(&mut self, status: BackendStatus) -> bool {
        if self.backend_status == status {
            return false;
        }

        self.backend_status = status;
        return true;
    }

    pub fn await_confirmation(&mut self, transaction: &str) {
        self.awaiting_confirmation = true;
        self.pending_transaction = Some(transaction.to_string());
    }

    /// Leaves confirmation mode, handing back the transaction text that was
    /// waiting for it.
    pub fn take_pending_transaction(&mut self) -> Option<String> {
        self.awaiting_confirmation = false;
        return self.pending_transaction.take();
    }

    pub fn clear_confirmation(&mut self) {
        self.awaiting_confirmation = false;
        self.pending_transaction = None;
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }
}
