//! Terminal input module (game-facing).
//!
//! Maps `crossterm` key events onto arcade [`Button`](crate::types::Button)s
//! and tracks which buttons are held, so games see one
//! [`Controls`](crate::types::Controls) snapshot per tick. Works in terminals
//! without key-release events by releasing keys after a timeout.

pub mod map;
pub mod tracker;

pub use tui_arcade_types as types;

pub use map::{map_key, should_quit};
pub use tracker::{KeyTracker, DEFAULT_KEY_RELEASE_TIMEOUT_MS};
