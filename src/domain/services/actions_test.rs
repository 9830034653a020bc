use std::sync::Arc;
use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time::Instant;

use super::ActionsService;
use crate::domain::models::Action;
use crate::domain::models::Backend;
use crate::domain::models::BackendPrompt;
use crate::domain::models::BackendStatus;
use crate::domain::models::Event;
use crate::domain::services::Messenger;

struct EchoBackend {}

#[async_trait]
impl Backend for EchoBackend {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn send_message(&self, text: &str) -> Result<String> {
        return Ok(format!("echo: {text}"));
    }
}

fn start() -> (
    mpsc::UnboundedSender<Action>,
    mpsc::UnboundedReceiver<Event>,
) {
    let messenger = Arc::new(Messenger::new(
        Box::new(EchoBackend {}),
        Duration::from_millis(300),
    ));
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    tokio::spawn(async move {
        return ActionsService::start(messenger, event_tx, &mut action_rx).await;
    });

    return (action_tx, event_rx);
}

#[tokio::test(start_paused = true)]
async fn it_posts_backend_responses() -> Result<()> {
    let (action_tx, mut event_rx) = start();

    action_tx.send(Action::BackendRequest(BackendPrompt::new("msg-1", "hello")))?;

    match event_rx.recv().await {
        Some(Event::BackendResponse(res)) => {
            assert_eq!(res.message_id, "msg-1");
            assert_eq!(res.text, "echo: hello");
            assert_eq!(res.status, BackendStatus::Online);
        }
        other => bail!("Unexpected event {other:?}"),
    }

    return Ok(());
}

#[tokio::test(start_paused = true)]
async fn it_posts_scheduled_events_after_the_delay() -> Result<()> {
    let (action_tx, mut event_rx) = start();
    let started = Instant::now();

    action_tx.send(Action::Schedule(
        Duration::from_millis(300),
        Event::MessageSent("msg-1".to_string()),
    ))?;

    match event_rx.recv().await {
        Some(Event::MessageSent(id)) => assert_eq!(id, "msg-1"),
        other => bail!("Unexpected event {other:?}"),
    }
    assert!(started.elapsed() >= Duration::from_millis(300));

    return Ok(());
}

#[tokio::test(start_paused = true)]
async fn it_runs_timers_independently_of_sends() -> Result<()> {
    let (action_tx, mut event_rx) = start();

    action_tx.send(Action::BackendRequest(BackendPrompt::new("msg-1", "hello")))?;
    action_tx.send(Action::Schedule(
        Duration::from_millis(100),
        Event::MessageSent("msg-1".to_string()),
    ))?;

    assert!(matches!(event_rx.recv().await, Some(Event::MessageSent(_))));
    assert!(matches!(
        event_rx.recv().await,
        Some(Event::BackendResponse(_))
    ));

    return Ok(());
}

#[tokio::test]
async fn it_stops_when_senders_are_dropped() -> Result<()> {
    let messenger = Arc::new(Messenger::new(
        Box::new(EchoBackend {}),
        Duration::from_millis(0),
    ));
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, _event_rx) = mpsc::unbounded_channel::<Event>();
    drop(action_tx);

    ActionsService::start(messenger, event_tx, &mut action_rx).await?;

    return Ok(());
}

#[tokio::test(start_paused = true)]
async fn it_keeps_running_when_scheduled_events_outlive_the_ui() -> Result<()> {
    let messenger = Arc::new(Messenger::new(
        Box::new(EchoBackend {}),
        Duration::from_millis(0),
    ));
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();
    drop(event_rx);

    let handle = tokio::spawn(async move {
        return ActionsService::start(messenger, event_tx, &mut action_rx).await;
    });

    action_tx.send(Action::Schedule(
        Duration::from_millis(100),
        Event::MessageSent("msg-1".to_string()),
    ))?;
    tokio::time::sleep(Duration::from_millis(500)).await;

    action_tx.send(Action::BackendRequest(BackendPrompt::new("msg-2", "hello")))?;
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(!handle.is_finished());

    drop(action_tx);
    handle.await??;

    return Ok(());
}
