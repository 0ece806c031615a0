//! Simulation building blocks shared by the arcade games.
//!
//! Nothing in here does I/O. Games are pure functions of their seed and the
//! per-tick [`Controls`](crate::types::Controls), which keeps them testable and
//! replayable.
//!
//! # Module Structure
//!
//! - [`fixed`]: Q16.16 fixed-point numbers used for all physics
//! - [`rng`]: seeded LCG for terrain, pits and pods
//! - [`pixels`]: the software rendering surface games draw into
//! - [`sprites`]: 1-bit bitmaps (ships, invaders, runner frames, digits)
//! - [`hud`]: score digits and fuel gauges
//! - [`collision`]: rectangles and swept point tests
//! - [`terrain`]: lander ground, cave tunnel loop, pits, fuel pods
//! - [`sound`]: per-tick sound cue queue and looped voices
//!
//! # Example
//!
//! ```
//! use tui_arcade_core::{Fx, PixelBuffer, SimpleRng};
//! use tui_arcade_core::terrain::LanderTerrain;
//! use tui_arcade_core::types::Color;
//!
//! let mut rng = SimpleRng::new(7);
//! let terrain = LanderTerrain::generate(&mut rng, 800, 600);
//! assert_eq!(terrain.height_at(320), 550);
//!
//! let mut pb = PixelBuffer::new(800, 600);
//! pb.fill_column(320, terrain.height_at(320), 600, Color::GRAY);
//! assert_eq!(pb.get(320, 599), Some(Color::GRAY));
//!
//! let gravity = Fx::from_ratio(1, 10);
//! let mut vy = Fx::ZERO;
//! for _ in 0..10 {
//!     vy += gravity;
//! }
//! assert_eq!(vy.trunc(), 0); // 0.99998..
//! ```

pub mod collision;
pub mod fixed;
pub mod hud;
pub mod pixels;
pub mod rng;
pub mod sound;
pub mod sprites;
pub mod terrain;

pub use tui_arcade_types as types;

pub use collision::Rect;
pub use fixed::Fx;
pub use pixels::PixelBuffer;
pub use rng::SimpleRng;
pub use sound::{LoopVoice, SoundQueue};
pub use sprites::Sprite;
