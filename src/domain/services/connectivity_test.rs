use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time;
use tokio::time::Instant;

use super::ConnectivityMonitor;
use crate::domain::models::Backend;
use crate::domain::models::BackendBox;
use crate::domain::models::BackendStatus;
use crate::domain::models::Event;

#[derive(Clone)]
struct ProbeBackend {
    healthy: Arc<AtomicBool>,
    delay: Duration,
    calls: Arc<AtomicUsize>,
}

impl ProbeBackend {
    fn new(healthy: bool, delay: Duration) -> ProbeBackend {
        return ProbeBackend {
            healthy: Arc::new(AtomicBool::new(healthy)),
            delay,
            calls: Arc::new(AtomicUsize::new(0)),
        };
    }
}

#[async_trait]
impl Backend for ProbeBackend {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        time::sleep(self.delay).await;
        if self.healthy.load(Ordering::SeqCst) {
            return Ok(());
        }

        bail!("backend down");
    }

    #[allow(clippy::implicit_return)]
    async fn send_message(&self, _text: &str) -> Result<String> {
        bail!("not used by the monitor");
    }
}

fn monitor(backend: &ProbeBackend) -> ConnectivityMonitor {
    return ConnectivityMonitor::new(
        Box::new(backend.clone()),
        Duration::from_secs(30),
        Duration::from_secs(5),
    );
}

async fn next_status(rx: &mut mpsc::UnboundedReceiver<Event>) -> Result<BackendStatus> {
    match rx.recv().await {
        Some(Event::BackendStatus(status)) => return Ok(status),
        other => bail!(format!("Unexpected event {other:?}")),
    }
}

#[tokio::test(start_paused = true)]
async fn it_probes_immediately_on_start() -> Result<()> {
    let backend = ProbeBackend::new(true, Duration::ZERO);
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();

    let start = Instant::now();
    let handle = monitor(&backend).start(tx);

    assert_eq!(next_status(&mut rx).await?, BackendStatus::Online);
    assert!(start.elapsed() < Duration::from_secs(1));

    handle.stop().await;
    return Ok(());
}

#[tokio::test(start_paused = true)]
async fn it_reports_offline_on_failures() -> Result<()> {
    let backend = ProbeBackend::new(false, Duration::ZERO);
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let handle = monitor(&backend).start(tx);

    assert_eq!(next_status(&mut rx).await?, BackendStatus::Offline);

    handle.stop().await;
    return Ok(());
}

#[tokio::test(start_paused = true)]
async fn it_times_out_slow_probes() -> Result<()> {
    let backend = ProbeBackend::new(true, Duration::from_secs(10));
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();

    let start = Instant::now();
    let handle = monitor(&backend).start(tx);

    assert_eq!(next_status(&mut rx).await?, BackendStatus::Offline);
    assert!(start.elapsed() >= Duration::from_secs(5));
    assert!(start.elapsed() < Duration::from_secs(10));

    handle.stop().await;
    return Ok(());
}

#[tokio::test(start_paused = true)]
async fn it_recovers_on_the_next_interval() -> Result<()> {
    let backend = ProbeBackend::new(false, Duration::ZERO);
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();

    let start = Instant::now();
    let handle = monitor(&backend).start(tx);
    assert_eq!(next_status(&mut rx).await?, BackendStatus::Offline);

    backend.healthy.store(true, Ordering::SeqCst);
    assert_eq!(next_status(&mut rx).await?, BackendStatus::Online);
    assert!(start.elapsed() >= Duration::from_secs(30));
    assert_eq!(backend.calls.load(Ordering::SeqCst), 2);

    handle.stop().await;
    return Ok(());
}

#[tokio::test(start_paused = true)]
async fn it_stops_probing_after_teardown() -> Result<()> {
    let backend = ProbeBackend::new(true, Duration::ZERO);
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let handle = monitor(&backend).start(tx);
    assert_eq!(next_status(&mut rx).await?, BackendStatus::Online);

    handle.stop().await;
    time::advance(Duration::from_secs(120)).await;

    assert!(rx.recv().await.is_none());
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    return Ok(());
}

#[tokio::test(start_paused = true)]
async fn it_probes_once_per_call() {
    let backend = ProbeBackend::new(true, Duration::ZERO);
    let boxed: BackendBox = Box::new(backend.clone());

    let status = ConnectivityMonitor::probe(&boxed, Duration::from_secs(5)).await;

    assert_eq!(status, BackendStatus::Online);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
}
