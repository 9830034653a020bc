#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;

/// Marks a reply that previews a transaction and must be confirmed by the
/// user before anything else is sent.
pub const TRANSACTION_PREVIEW_MARKER: &str = "Transaction Preview:";

pub const BACKEND_APOLOGY: &str = "Sorry, I'm having trouble connecting to my backend. Please check your connection and try again.";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BackendStatus {
    #[default]
    Checking,
    Online,
    Offline,
}

impl BackendStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BackendStatus::Checking => return "Connecting...",
            BackendStatus::Online => return "Online",
            BackendStatus::Offline => return "Offline",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendPrompt {
    /// Id of the user message this prompt answers.
    pub message_id: String,
    pub text: String,
}

impl BackendPrompt {
    pub fn new(message_id: &str, text: &str) -> BackendPrompt {
        return BackendPrompt {
            message_id: message_id.to_string(),
            text: text.to_string(),
        };
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendResponse {
    pub message_id: String,
    pub prompt: String,
    pub text: String,
    pub status: BackendStatus,
    pub transaction_preview: bool,
}

impl BackendResponse {
    pub fn reply(prompt: &BackendPrompt, text: &str) -> BackendResponse {
        return BackendResponse {
            message_id: prompt.message_id.to_string(),
            prompt: prompt.text.to_string(),
            text: text.to_string(),
            status: BackendStatus::Online,
            transaction_preview: text.contains(TRANSACTION_PREVIEW_MARKER),
        };
    }

    pub fn failure(prompt: &BackendPrompt) -> BackendResponse {
        return BackendResponse {
            message_id: prompt.message_id.to_string(),
            prompt: prompt.text.to_string(),
            text: BACKEND_APOLOGY.to_string(),
            status: BackendStatus::Offline,
            transaction_preview: false,
        };
    }
}

#[async_trait]
pub trait Backend {
    /// Probes the backend once. Any error, including a non-OK status, means the
    /// backend is unreachable.
    async fn health_check(&self) -> Result<()>;

    /// Sends a single chat message and returns the reply text untouched. There
    /// is no retry on failure.
    async fn send_message(&self, text: &str) -> Result<String>;
}

pub type BackendBox = Box<dyn Backend + Send + Sync>;
