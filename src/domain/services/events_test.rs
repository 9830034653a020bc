use crossterm::event::Event as CrosstermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;

use super::EventsService;
use crate::domain::models::Event;

fn key(code: KeyCode, modifiers: KeyModifiers) -> Option<Event> {
    return EventsService::handle_crossterm(CrosstermEvent::Key(KeyEvent::new(code, modifiers)));
}

fn ctrl(c: char) -> Option<Event> {
    return key(KeyCode::Char(c), KeyModifiers::CONTROL);
}

#[test]
fn it_maps_control_keys() {
    assert!(matches!(ctrl('c'), Some(Event::KeyboardCTRLC())));
    assert!(matches!(ctrl('g'), Some(Event::KeyboardCTRLG())));
    assert!(matches!(ctrl('y'), Some(Event::TransactionConfirm())));
    assert!(matches!(ctrl('n'), Some(Event::TransactionCancel())));
    assert!(matches!(ctrl('u'), Some(Event::UIScrollPageUp())));
    assert!(matches!(ctrl('d'), Some(Event::UIScrollPageDown())));
}

#[test]
fn it_maps_navigation_keys() {
    assert!(matches!(
        key(KeyCode::Enter, KeyModifiers::NONE),
        Some(Event::KeyboardEnter())
    ));
    assert!(matches!(
        key(KeyCode::Up, KeyModifiers::NONE),
        Some(Event::UIScrollUp())
    ));
    assert!(matches!(
        key(KeyCode::Down, KeyModifiers::NONE),
        Some(Event::UIScrollDown())
    ));
    assert!(matches!(
        key(KeyCode::PageUp, KeyModifiers::NONE),
        Some(Event::UIScrollPageUp())
    ));
    assert!(matches!(
        key(KeyCode::PageDown, KeyModifiers::NONE),
        Some(Event::UIScrollPageDown())
    ));
}

#[test]
fn it_maps_the_info_key() {
    assert!(matches!(
        key(KeyCode::F(1), KeyModifiers::NONE),
        Some(Event::UIToggleInfo())
    ));
    assert!(matches!(
        key(KeyCode::F(2), KeyModifiers::NONE),
        Some(Event::KeyboardCharInput(_))
    ));
}

#[test]
fn it_passes_through_text_input() {
    assert!(matches!(
        key(KeyCode::Char('y'), KeyModifiers::NONE),
        Some(Event::KeyboardCharInput(_))
    ));
    assert!(matches!(
        key(KeyCode::Backspace, KeyModifiers::NONE),
        Some(Event::KeyboardCharInput(_))
    ));
}

#[test]
fn it_maps_mouse_and_paste() {
    let scroll = |kind: MouseEventKind| {
        return EventsService::handle_crossterm(CrosstermEvent::Mouse(MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }));
    };

    assert!(matches!(
        scroll(MouseEventKind::ScrollUp),
        Some(Event::UIScrollUp())
    ));
    assert!(matches!(
        scroll(MouseEventKind::ScrollDown),
        Some(Event::UIScrollDown())
    ));
    assert!(scroll(MouseEventKind::Moved).is_none());

    match EventsService::handle_crossterm(CrosstermEvent::Paste("hello".to_string())) {
        Some(Event::KeyboardPaste(text)) => assert_eq!(text, "hello"),
        other => panic!("Unexpected event {other:?}"),
    }
}

#[test]
fn it_ignores_focus_changes() {
    assert!(EventsService::handle_crossterm(CrosstermEvent::FocusGained).is_none());
}
