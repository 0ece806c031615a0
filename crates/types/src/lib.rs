//! Shared types and constants for the arcade demos.
//!
//! Everything in here is plain data with no dependencies, so it can be used by
//! the simulation crates, the terminal front-end and the tests alike.
//!
//! # Screen
//!
//! All games draw into a logical 800x600 pixel buffer. The terminal presenter
//! scales that buffer down to whatever the terminal can show.
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `OUTCOME_LINGER_MS` | 1000 | Final frame stays up this long after a game ends |
//!
//! # Examples
//!
//! ```
//! use tui_arcade_types::{Button, Color, Controls};
//!
//! let controls = Controls::default().with_held(Button::Left).with_pressed(Button::Fire);
//! assert!(controls.is_held(Button::Left));
//! assert!(controls.is_held(Button::Fire));
//! assert!(controls.was_pressed(Button::Fire));
//! assert!(!controls.was_pressed(Button::Left));
//!
//! assert_eq!(Color::ORANGE.r(), 0xFF);
//! assert_eq!(Color::ORANGE.g(), 0x80);
//! ```

/// Logical screen width in pixels.
pub const SCREEN_WIDTH: i32 = 800;

/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: i32 = 600;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS).
pub const TICK_MS: u32 = 16;

/// How long the last frame stays on screen after a game ends.
pub const OUTCOME_LINGER_MS: u32 = 1000;

/// Number of mixer channels.
pub const MIXER_CHANNELS: usize = 8;

/// Packed `0xRRGGBBAA` pixel color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x000000FF);
    pub const WHITE: Color = Color(0xFFFFFFFF);
    pub const GRAY: Color = Color(0x808080FF);
    pub const GREEN: Color = Color(0x00FF00FF);
    pub const YELLOW: Color = Color(0xFFFF00FF);
    pub const ORANGE: Color = Color(0xFF8000FF);
    pub const RED: Color = Color(0xFF0000FF);
    pub const BLUE: Color = Color(0x0000FFFF);
    pub const CYAN: Color = Color(0x00FFFFFF);
    pub const MAGENTA: Color = Color(0xFF00FFFF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | 0xFF)
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Sum of the color channels, used to pick the most visible pixel of a block.
    pub const fn brightness(self) -> u16 {
        self.r() as u16 + self.g() as u16 + self.b() as u16
    }
}

/// Logical buttons shared by all games.
///
/// The plain directions double as player 2 in the cave flyer; the `Alt*`
/// directions are player 1 (WASD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Right,
    Up,
    Down,
    Fire,
    AltLeft,
    AltRight,
    AltUp,
    AltDown,
    /// Next palette color (paint).
    Cycle,
    /// Wipe the canvas (paint).
    Clear,
}

impl Button {
    pub const ALL: [Button; 11] = [
        Button::Left,
        Button::Right,
        Button::Up,
        Button::Down,
        Button::Fire,
        Button::AltLeft,
        Button::AltRight,
        Button::AltUp,
        Button::AltDown,
        Button::Cycle,
        Button::Clear,
    ];

    pub const fn bit(self) -> u16 {
        1 << (self as u16)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Button::Left => "left",
            Button::Right => "right",
            Button::Up => "up",
            Button::Down => "down",
            Button::Fire => "fire",
            Button::AltLeft => "altLeft",
            Button::AltRight => "altRight",
            Button::AltUp => "altUp",
            Button::AltDown => "altDown",
            Button::Cycle => "cycle",
            Button::Clear => "clear",
        }
    }
}

/// Input state for one tick.
///
/// `held` is level state, `pressed` holds the press edges seen since the
/// previous tick. A button pressed this tick is always also held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controls {
    pub held: u16,
    pub pressed: u16,
}

impl Controls {
    pub const NONE: Controls = Controls { held: 0, pressed: 0 };

    pub fn is_held(&self, button: Button) -> bool {
        self.held & button.bit() != 0
    }

    pub fn was_pressed(&self, button: Button) -> bool {
        self.pressed & button.bit() != 0
    }

    pub fn with_held(mut self, button: Button) -> Self {
        self.held |= button.bit();
        self
    }

    pub fn with_pressed(mut self, button: Button) -> Self {
        self.held |= button.bit();
        self.pressed |= button.bit();
        self
    }
}

/// Sound effects the games can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    Thruster,
    Crash,
    Land,
}

impl Sound {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sound::Thruster => "thruster",
            Sound::Crash => "crash",
            Sound::Land => "land",
        }
    }
}

/// Mixer channel index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Channel(pub u8);

/// An instruction for the mixer, emitted by a game tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Play {
        channel: Channel,
        sound: Sound,
        looped: bool,
    },
    Halt {
        channel: Channel,
    },
}

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Lander touched down on the pad slowly enough.
    Landed,
    /// Lander hit the ground too fast or off the pad.
    Crashed,
    /// Every invader destroyed.
    Won,
    /// Cannon destroyed or invaded.
    Lost,
    /// Runner fell off the bottom of a pit.
    FellInPit,
    /// Both cave flyers crashed.
    AllCrashed,
}

impl Outcome {
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Landed => "Landed!",
            Outcome::Crashed => "Crashed!",
            Outcome::Won => "You Win!",
            Outcome::Lost => "Game Over!",
            Outcome::FellInPit => "You fell into a pit! Game Over.",
            Outcome::AllCrashed => "Both players crashed!",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Landed => "landed",
            Outcome::Crashed => "crashed",
            Outcome::Won => "won",
            Outcome::Lost => "lost",
            Outcome::FellInPit => "fellInPit",
            Outcome::AllCrashed => "allCrashed",
        }
    }
}

/// Result of a single game tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Over(Outcome),
}

impl Status {
    pub fn is_over(&self) -> bool {
        matches!(self, Status::Over(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Status::Running => None,
            Status::Over(o) => Some(*o),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_bits_are_distinct() {
        let mut seen = 0u16;
        for b in Button::ALL {
            assert_eq!(seen & b.bit(), 0, "{} overlaps", b.as_str());
            seen |= b.bit();
        }
        assert_eq!(seen.count_ones() as usize, Button::ALL.len());
    }

    #[test]
    fn color_channels_unpack() {
        let c = Color::rgb(1, 2, 3);
        assert_eq!((c.r(), c.g(), c.b()), (1, 2, 3));
        assert_eq!(c.0 & 0xFF, 0xFF);
        assert_eq!(Color::BLACK.brightness(), 0);
        assert_eq!(Color::WHITE.brightness(), 765);
    }

    #[test]
    fn pressed_implies_held() {
        let c = Controls::NONE.with_pressed(Button::Cycle);
        assert!(c.is_held(Button::Cycle));
        assert!(c.was_pressed(Button::Cycle));
        assert!(!c.is_held(Button::Clear));
    }

    #[test]
    fn status_reports_outcome() {
        assert_eq!(Status::Running.outcome(), None);
        assert!(Status::Over(Outcome::Won).is_over());
        assert_eq!(Status::Over(Outcome::Won).outcome(), Some(Outcome::Won));
    }
}
