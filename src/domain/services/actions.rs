#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time;

use super::Messenger;
use crate::domain::models::Action;
use crate::domain::models::Event;

pub struct ActionsService {}

impl ActionsService {
    /// Runs until every action sender is dropped. Each action gets its own
    /// task, so a slow backend never holds up the UI timers.
    pub async fn start(
        messenger: Arc<Messenger>,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        while let Some(action) = rx.recv().await {
            let worker_tx = tx.clone();
            match action {
                Action::BackendRequest(prompt) => {
                    tracing::debug!(message_id = prompt.message_id.as_str(), "Sending prompt");
                    let worker_messenger = messenger.clone();
                    tokio::spawn(async move {
                        let res = worker_messenger.send(prompt).await;
                        if worker_tx.send(Event::BackendResponse(res)).is_err() {
                            tracing::warn!("UI closed before the backend replied");
                        }
                    });
                }
                Action::Schedule(delay, event) => {
                    tokio::spawn(async move {
                        time::sleep(delay).await;
                        if worker_tx.send(event).is_err() {
                            tracing::warn!("UI closed before a scheduled event fired");
                        }
                    });
                }
            }
        }

        return Ok(());
    }
}
