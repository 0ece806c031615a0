use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use tui_arcade::input::{should_quit, KeyTracker};
use tui_arcade::types::Button;

fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
    KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
}

#[test]
fn terminal_without_releases_uses_the_timeout() {
    let mut tracker = KeyTracker::new();
    tracker.handle_key_event(key(KeyCode::Left, KeyEventKind::Press), 0);

    let c = tracker.take_controls(0);
    assert!(c.is_held(Button::Left));
    assert!(c.was_pressed(Button::Left));

    let c = tracker.take_controls(100);
    assert!(c.is_held(Button::Left));
    assert!(!c.was_pressed(Button::Left));

    // Auto-repeat keeps it alive.
    tracker.handle_key_event(key(KeyCode::Left, KeyEventKind::Repeat), 140);
    assert!(tracker.take_controls(250).is_held(Button::Left));

    assert!(!tracker.take_controls(400).is_held(Button::Left));
}

#[test]
fn terminal_with_releases_holds_until_release() {
    let mut tracker = KeyTracker::new().with_release_events();
    tracker.handle_key_event(key(KeyCode::Char('w'), KeyEventKind::Press), 0);
    assert!(tracker.take_controls(10_000).is_held(Button::AltUp));

    tracker.handle_key_event(key(KeyCode::Char('w'), KeyEventKind::Release), 10_001);
    assert!(!tracker.take_controls(10_002).is_held(Button::AltUp));
}

#[test]
fn a_tap_between_ticks_is_still_seen() {
    let mut tracker = KeyTracker::new().with_release_events();
    tracker.handle_key_event(key(KeyCode::Char(' '), KeyEventKind::Press), 5);
    tracker.handle_key_event(key(KeyCode::Char(' '), KeyEventKind::Release), 8);

    let c = tracker.take_controls(16);
    assert!(c.was_pressed(Button::Fire));
    assert!(c.is_held(Button::Fire));
    assert!(!tracker.take_controls(32).is_held(Button::Fire));
}

#[test]
fn unmapped_keys_are_ignored_and_quit_keys_detected() {
    let mut tracker = KeyTracker::new();
    assert_eq!(
        tracker.handle_key_event(key(KeyCode::Char('z'), KeyEventKind::Press), 0),
        None
    );
    assert_eq!(tracker.take_controls(0).held, 0);

    assert!(should_quit(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
    assert!(should_quit(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
    assert!(should_quit(KeyEvent::new(
        KeyCode::Char('c'),
        KeyModifiers::CONTROL
    )));
    assert!(!should_quit(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
}
