use super::BackendPrompt;
use super::BackendResponse;
use super::BackendStatus;
use super::BACKEND_APOLOGY;

#[test]
fn it_labels_statuses() {
    assert_eq!(BackendStatus::default(), BackendStatus::Checking);
    assert_eq!(BackendStatus::Checking.label(), "Connecting...");
    assert_eq!(BackendStatus::Online.label(), "Online");
    assert_eq!(BackendStatus::Offline.label(), "Offline");
}

#[test]
fn it_builds_a_reply() {
    let prompt = BackendPrompt::new("msg-1", "hello");
    let res = BackendResponse::reply(&prompt, "hi there");

    assert_eq!(res.message_id, "msg-1");
    assert_eq!(res.prompt, "hello");
    assert_eq!(res.text, "hi there");
    assert_eq!(res.status, BackendStatus::Online);
    assert!(!res.transaction_preview);
}

#[test]
fn it_flags_transaction_previews() {
    let prompt = BackendPrompt::new("msg-1", "send 5 FLR to X");
    let res = BackendResponse::reply(&prompt, "Transaction Preview: send 5 to X");

    assert!(res.transaction_preview);
    assert_eq!(res.prompt, "send 5 FLR to X");
}

#[test]
fn it_only_flags_the_exact_marker() {
    let prompt = BackendPrompt::new("msg-1", "hello");
    let res = BackendResponse::reply(&prompt, "transaction preview: lowercase");

    assert!(!res.transaction_preview);
}

#[test]
fn it_builds_a_failure() {
    let prompt = BackendPrompt::new("msg-1", "hello");
    let res = BackendResponse::failure(&prompt);

    assert_eq!(res.text, BACKEND_APOLOGY);
    assert_eq!(res.status, BackendStatus::Offline);
    assert!(!res.transaction_preview);
}
