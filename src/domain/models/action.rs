use std::time::Duration;

use super::BackendPrompt;
use super::Event;

#[derive(Debug)]
pub enum Action {
    BackendRequest(BackendPrompt),
    /// Posts the event back to the UI once the delay has passed.
    Schedule(Duration, Event),
}
