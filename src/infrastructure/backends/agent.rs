#[cfg(test)]
#[path = "agent_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;

pub const CHAT_ROUTE: &str = "api/routes/chat/";

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ChatRequest {
    message: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ChatResponse {
    response: String,
}

/// HTTP client for the agent's chat routes.
pub struct Agent {
    url: String,
    timeout: String,
}

impl Default for Agent {
    fn default() -> Agent {
        return Agent::new(
            &Config::get(ConfigKey::BackendURL),
            &Config::get(ConfigKey::PingTimeout),
        );
    }
}

impl Agent {
    pub fn new(url: &str, timeout: &str) -> Agent {
        return Agent {
            url: url.to_string(),
            timeout: timeout.to_string(),
        };
    }

    fn route(&self, path: &str) -> String {
        return format!("{}/{CHAT_ROUTE}{path}", self.url.trim_end_matches('/'));
    }
}

#[async_trait]
impl Backend for Agent {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        let res = reqwest::Client::new()
            .get(self.route("ping"))
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        let status = match res {
            Ok(res) => res.status(),
            Err(err) => {
                tracing::error!(error = ?err, "Agent backend is not reachable");
                bail!("Agent backend is not reachable");
            }
        };

        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "Agent backend health check failed");
            bail!("Agent backend health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn send_message(&self, text: &str) -> Result<String> {
        let req = ChatRequest {
            message: text.to_string(),
        };

        let res = reqwest::Client::new()
            .post(self.route(""))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to send chat message to the agent backend"
            );
            bail!("Failed to send chat message to the agent backend");
        }

        let text = res.text().await?;
        let body = match serde_json::from_str::<ChatResponse>(&text) {
            Ok(body) => body,
            Err(err) => {
                tracing::error!(error = ?err, body = text.as_str(), "Undecodable chat response");
                bail!("Agent backend returned an undecodable chat response");
            }
        };
        tracing::debug!(body = ?body, "Chat response");

        return Ok(body.response);
    }
}
