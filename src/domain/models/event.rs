use tui_textarea::Input;

use super::BackendResponse;
use super::BackendStatus;

#[derive(Debug)]
pub enum Event {
    BackendResponse(BackendResponse),
    BackendStatus(BackendStatus),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardCTRLG(),
    KeyboardEnter(),
    KeyboardPaste(String),
    MessageSent(String),
    MessageSettled(String),
    TransactionCancel(),
    TransactionConfirm(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
    UIToggleInfo(),
}
