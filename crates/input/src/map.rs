//! Key mapping from terminal events to arcade buttons.

use crate::types::Button;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key to the button it drives.
pub fn map_key(code: KeyCode) -> Option<Button> {
    match code {
        KeyCode::Left => Some(Button::Left),
        KeyCode::Right => Some(Button::Right),
        KeyCode::Up => Some(Button::Up),
        KeyCode::Down => Some(Button::Down),
        KeyCode::Char(' ') => Some(Button::Fire),

        // Player one in the cave flyer.
        KeyCode::Char('a') | KeyCode::Char('A') => Some(Button::AltLeft),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(Button::AltRight),
        KeyCode::Char('w') | KeyCode::Char('W') => Some(Button::AltUp),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Button::AltDown),

        KeyCode::Char('c') | KeyCode::Char('C') => Some(Button::Cycle),
        KeyCode::Char('x') | KeyCode::Char('X') => Some(Button::Clear),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
