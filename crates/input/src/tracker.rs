//! Held-button tracking for terminal environments.
//!
//! Supports terminals that do not emit key release events by using a timeout.

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::map_key;
use crate::types::{Button, Controls};

// Without release events a key is only "held" while the terminal keeps
// sending auto-repeat presses. The first repeat usually arrives after a
// few hundred ms, so taps shorter than this read as one tick of input.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Turns key press/repeat/release events into per-tick [`Controls`].
#[derive(Debug, Clone)]
pub struct KeyTracker {
    held: u16,
    pressed: u16,
    last_seen_ms: [u64; Button::ALL.len()],
    key_release_timeout_ms: Option<u32>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self {
            held: 0,
            pressed: 0,
            last_seen_ms: [0; Button::ALL.len()],
            key_release_timeout_ms: Some(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = Some(timeout_ms);
        self
    }

    /// The terminal reports releases, so never auto-release.
    pub fn with_release_events(mut self) -> Self {
        self.key_release_timeout_ms = None;
        self
    }

    pub fn key_release_timeout_ms(&self) -> Option<u32> {
        self.key_release_timeout_ms
    }

    /// Feed one terminal key event. Returns the button it maps to, if any.
    pub fn handle_key_event(&mut self, key: KeyEvent, now_ms: u64) -> Option<Button> {
        let button = map_key(key.code)?;
        match key.kind {
            KeyEventKind::Press => self.handle_press(button, now_ms),
            KeyEventKind::Repeat => self.handle_repeat(button, now_ms),
            KeyEventKind::Release => self.handle_release(button),
        }
        Some(button)
    }

    /// A press edge is only recorded when the button was not already held,
    /// so terminals that report auto-repeat as presses do not re-trigger.
    pub fn handle_press(&mut self, button: Button, now_ms: u64) {
        if self.held & button.bit() == 0 {
            self.pressed |= button.bit();
        }
        self.handle_repeat(button, now_ms);
    }

    pub fn handle_repeat(&mut self, button: Button, now_ms: u64) {
        self.held |= button.bit();
        self.last_seen_ms[button as usize] = now_ms;
    }

    pub fn handle_release(&mut self, button: Button) {
        self.held &= !button.bit();
    }

    pub fn is_held(&self, button: Button) -> bool {
        self.held & button.bit() != 0
    }

    /// Controls for the tick starting at `now_ms`. Clears the press edges.
    pub fn take_controls(&mut self, now_ms: u64) -> Controls {
        if let Some(timeout) = self.key_release_timeout_ms {
            for button in Button::ALL {
                let since = now_ms.saturating_sub(self.last_seen_ms[button as usize]);
                if since > u64::from(timeout) {
                    self.held &= !button.bit();
                }
            }
        }

        let controls = Controls {
            held: self.held | self.pressed,
            pressed: self.pressed,
        };
        self.pressed = 0;
        controls
    }

    pub fn reset(&mut self) {
        self.held = 0;
        self.pressed = 0;
    }
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn event(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_press_is_an_edge_once() {
        let mut kt = KeyTracker::new();
        kt.handle_press(Button::Fire, 0);
        let c = kt.take_controls(10);
        assert!(c.was_pressed(Button::Fire));
        assert!(c.is_held(Button::Fire));

        // Terminal auto-repeat arriving as another press is not a new edge.
        kt.handle_press(Button::Fire, 40);
        let c = kt.take_controls(50);
        assert!(!c.was_pressed(Button::Fire));
        assert!(c.is_held(Button::Fire));
    }

    #[test]
    fn test_auto_release_after_timeout() {
        let mut kt = KeyTracker::new().with_key_release_timeout_ms(100);
        kt.handle_press(Button::Left, 1_000);
        assert!(kt.take_controls(1_100).is_held(Button::Left));
        kt.handle_repeat(Button::Left, 1_150);
        assert!(kt.take_controls(1_250).is_held(Button::Left));
        assert!(!kt.take_controls(1_251).is_held(Button::Left));
    }

    #[test]
    fn test_quick_tap_still_reaches_one_tick() {
        let mut kt = KeyTracker::new().with_key_release_timeout_ms(100);
        kt.handle_press(Button::Fire, 0);
        kt.handle_release(Button::Fire);
        let c = kt.take_controls(500);
        assert!(c.was_pressed(Button::Fire));
        assert!(c.is_held(Button::Fire));
        assert_eq!(kt.take_controls(516), Controls::NONE);
    }

    #[test]
    fn test_release_events_disable_timeout() {
        let mut kt = KeyTracker::new().with_release_events();
        assert_eq!(kt.key_release_timeout_ms(), None);
        kt.handle_key_event(event(KeyCode::Up, KeyEventKind::Press), 0);
        assert!(kt.take_controls(10_000).is_held(Button::Up));
        kt.handle_key_event(event(KeyCode::Up, KeyEventKind::Release), 10_001);
        assert!(!kt.take_controls(10_002).is_held(Button::Up));
    }

    #[test]
    fn test_unmapped_keys_are_ignored() {
        let mut kt = KeyTracker::new();
        assert_eq!(
            kt.handle_key_event(event(KeyCode::Char('z'), KeyEventKind::Press), 0),
            None
        );
        assert_eq!(kt.take_controls(1), Controls::NONE);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut kt = KeyTracker::new();
        kt.handle_press(Button::AltUp, 0);
        kt.reset();
        assert!(!kt.is_held(Button::AltUp));
        assert_eq!(kt.take_controls(1), Controls::NONE);
    }
}
