#[cfg(test)]
#[path = "messenger_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::Result;
use tokio::time;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendBox;
use crate::domain::models::BackendPrompt;
use crate::domain::models::BackendResponse;
use crate::infrastructure::backends::BackendManager;

/// Sends chat messages to the backend. Sending never fails from the caller's
/// point of view: errors turn into an apology reply and an offline status.
pub struct Messenger {
    backend: BackendBox,
    reply_delay: Duration,
}

impl Messenger {
    pub fn new(backend: BackendBox, reply_delay: Duration) -> Messenger {
        return Messenger {
            backend,
            reply_delay,
        };
    }

    pub fn from_config() -> Result<Messenger> {
        return Ok(Messenger::new(
            BackendManager::get()?,
            Config::duration(ConfigKey::ReplyDelay)?,
        ));
    }

    pub async fn send(&self, prompt: BackendPrompt) -> BackendResponse {
        match self.backend.send_message(&prompt.text).await {
            Ok(text) => {
                let res = BackendResponse::reply(&prompt, &text);
                tracing::debug!(
                    message_id = res.message_id.as_str(),
                    transaction_preview = res.transaction_preview,
                    "Backend replied"
                );

                time::sleep(self.reply_delay).await;
                return res;
            }
            Err(err) => {
                tracing::error!(
                    error = ?err,
                    message_id = prompt.message_id.as_str(),
                    "Backend send failed"
                );
                return BackendResponse::failure(&prompt);
            }
        }
    }
}
