use super::SessionState;
use crate::domain::models::Author;
use crate::domain::models::BackendStatus;
use crate::domain::models::Message;
use crate::domain::models::MessageStatus;
use crate::domain::models::WELCOME_MESSAGE_ID;

#[test]
fn it_seeds_the_welcome_message() {
    let state = SessionState::default();

    assert_eq!(state.messages().len(), 1);
    assert_eq!(state.messages()[0].id, WELCOME_MESSAGE_ID);
    assert_eq!(state.backend_status(), BackendStatus::Checking);
    assert!(!state.awaiting_confirmation());
    assert_eq!(state.pending_transaction(), None);
    assert!(!state.is_busy());
}

#[test]
fn it_appends_in_insertion_order() {
    let mut state = SessionState::default();
    let first = Message::new(Author::User, "first");
    let second = Message::new(Author::Bot, "second");
    let first_id = first.id.to_string();
    let second_id = second.id.to_string();

    state.append(first);
    state.append(second);

    let ids = state
        .messages()
        .iter()
        .map(|m| return m.id.to_string())
        .collect::<Vec<String>>();
    assert_eq!(ids, vec![WELCOME_MESSAGE_ID.to_string(), first_id, second_id]);
}

#[test]
fn it_advances_status_by_id() {
    let mut state = SessionState::default();
    let msg = Message::new(Author::User, "hello");
    let id = msg.id.to_string();
    state.append(msg);

    assert!(state.advance_status(&id, MessageStatus::Read));
    assert!(!state.advance_status(&id, MessageStatus::Sent));
    assert_eq!(state.message(&id).unwrap().status(), MessageStatus::Read);
    assert!(!state.advance_status("msg-missing", MessageStatus::Read));
}

#[test]
fn it_settles_by_id() {
    let mut state = SessionState::default();
    let msg = Message::new(Author::Bot, "hello");
    let id = msg.id.to_string();
    state.append(msg);

    assert!(state.settle(&id));
    assert!(!state.message(&id).unwrap().is_new());
    assert!(!state.settle("msg-missing"));
}

#[test]
fn it_reports_backend_status_changes() {
    let mut state = SessionState::default();

    assert!(state.set_backend_status(BackendStatus::Online));
    assert!(!state.set_backend_status(BackendStatus::Online));
    assert!(state.set_backend_status(BackendStatus::Offline));
    assert_eq!(state.backend_status(), BackendStatus::Offline);
}

#[test]
fn it_holds_pending_transactions_only_while_awaiting() {
    let mut state = SessionState::default();
    state.await_confirmation("send 5 FLR to X");

    assert!(state.awaiting_confirmation());
    assert_eq!(state.pending_transaction(), Some("send 5 FLR to X"));

    let taken = state.take_pending_transaction();
    assert_eq!(taken, Some("send 5 FLR to X".to_string()));
    assert!(!state.awaiting_confirmation());
    assert_eq!(state.pending_transaction(), None);
}

#[test]
fn it_clears_confirmation() {
    let mut state = SessionState::default();
    state.await_confirmation("send 5 FLR to X");
    state.clear_confirmation();

    assert!(!state.awaiting_confirmation());
    assert_eq!(state.pending_transaction(), None);
}
