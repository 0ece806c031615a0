//! The arcade games.
//!
//! Every game implements [`Game`]: a fixed-step simulation driven by one
//! [`Controls`] snapshot per tick, that emits sound cues and draws a full
//! frame into a [`PixelBuffer`] on demand. Games never touch the terminal.

pub mod cave;
pub mod invaders;
pub mod lander;
pub mod paint;
pub mod pitfall;

use std::fmt;
use std::str::FromStr;

pub use tui_arcade_core as core;
pub use tui_arcade_types as types;

use crate::core::{PixelBuffer, SoundQueue};
use crate::types::{Controls, Status};

pub use cave::Cave;
pub use invaders::Invaders;
pub use lander::Lander;
pub use paint::Paint;
pub use pitfall::Pitfall;

pub trait Game {
    fn title(&self) -> &'static str;

    /// One line of key help for the status bar.
    fn help(&self) -> &'static str;

    /// Advance one fixed step. Once the game is over this is a no-op that
    /// keeps returning the same outcome.
    fn tick(&mut self, controls: Controls, sfx: &mut SoundQueue) -> Status;

    /// Draw a complete frame.
    fn render(&self, pb: &mut PixelBuffer);

    fn score(&self) -> u32;

    /// Number of simulated ticks.
    fn frames(&self) -> u64;

    fn status(&self) -> Status;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKind {
    Lander,
    Invaders,
    Pitfall,
    Cave,
    Paint,
}

impl GameKind {
    pub const ALL: [GameKind; 5] = [
        GameKind::Lander,
        GameKind::Invaders,
        GameKind::Pitfall,
        GameKind::Cave,
        GameKind::Paint,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Lander => "lander",
            GameKind::Invaders => "invaders",
            GameKind::Pitfall => "pitfall",
            GameKind::Cave => "cave",
            GameKind::Paint => "paint",
        }
    }

    /// Build a fresh game. `tick_ms` only matters to games that scale
    /// motion by wall time (the cave flyer).
    pub fn create(self, seed: u32, tick_ms: u32) -> Box<dyn Game> {
        match self {
            GameKind::Lander => Box::new(Lander::new(seed)),
            GameKind::Invaders => Box::new(Invaders::new(tick_ms)),
            GameKind::Pitfall => Box::new(Pitfall::new(seed)),
            GameKind::Cave => Box::new(Cave::new(seed, tick_ms)),
            GameKind::Paint => Box::new(Paint::new()),
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGame(pub String);

impl fmt::Display for UnknownGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown game `{}`", self.0)
    }
}

impl std::error::Error for UnknownGame {}

impl FromStr for GameKind {
    type Err = UnknownGame;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownGame(s.to_string()))
    }
}
