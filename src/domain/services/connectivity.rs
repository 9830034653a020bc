#[cfg(test)]
#[path = "connectivity_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendBox;
use crate::domain::models::BackendStatus;
use crate::domain::models::Event;
use crate::infrastructure::backends::BackendManager;

/// Periodically probes the backend and reports whether it is reachable.
pub struct ConnectivityMonitor {
    backend: BackendBox,
    interval: Duration,
    timeout: Duration,
}

/// Running monitor. Stopping or dropping it cancels the probe timer.
pub struct MonitorHandle {
    token: CancellationToken,
    worker: JoinHandle<()>,
}

impl ConnectivityMonitor {
    pub fn new(backend: BackendBox, interval: Duration, timeout: Duration) -> ConnectivityMonitor {
        return ConnectivityMonitor {
            backend,
            interval,
            timeout,
        };
    }

    pub fn from_config() -> Result<ConnectivityMonitor> {
        let interval = Config::duration(ConfigKey::PingInterval)?;
        if interval.is_zero() {
            bail!("ping-interval must be greater than 0");
        }

        return Ok(ConnectivityMonitor::new(
            BackendManager::get()?,
            interval,
            Config::duration(ConfigKey::PingTimeout)?,
        ));
    }

    /// One bounded health check. Timeouts and failures both read as offline.
    pub async fn probe(backend: &BackendBox, timeout: Duration) -> BackendStatus {
        match time::timeout(timeout, backend.health_check()).await {
            Ok(Ok(())) => {
                return BackendStatus::Online;
            }
            Ok(Err(err)) => {
                tracing::warn!(error = ?err, "Backend probe failed");
                return BackendStatus::Offline;
            }
            Err(_) => {
                tracing::warn!(timeout_ms = timeout.as_millis() as u64, "Backend probe timed out");
                return BackendStatus::Offline;
            }
        }
    }

    pub fn start(self, tx: mpsc::UnboundedSender<Event>) -> MonitorHandle {
        let token = CancellationToken::new();
        let cancelled = token.clone();

        let worker = tokio::spawn(async move {
            let mut ticker = time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                let status = tokio::select! {
                    _ = cancelled.cancelled() => break,
                    status = ConnectivityMonitor::probe(&self.backend, self.timeout) => status,
                };

                tracing::debug!(status = ?status, "Backend probe");
                if tx.send(Event::BackendStatus(status)).is_err() {
                    break;
                }
            }
        });

        return MonitorHandle { token, worker };
    }
}

impl MonitorHandle {
    /// Cancels the timer and waits for the probe task to finish.
    pub async fn stop(mut self) {
        self.token.cancel();
        if let Err(err) = (&mut self.worker).await {
            tracing::error!(error = ?err, "Connectivity monitor did not shut down cleanly");
        }
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
