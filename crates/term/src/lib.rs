//! Terminal "game renderer" module.
//!
//! Games draw into a [`PixelBuffer`](crate::core::PixelBuffer); this crate
//! turns that into styled character cells and flushes them to the terminal.
//! It avoids widget/layout libraries and renders into a simple framebuffer.
//!
//! Pipeline:
//! - [`present`] scales the pixel buffer into half-block cells
//! - [`view`] adds the status line and outcome banner
//! - [`renderer`] diffs against the previous frame and writes the changes

pub mod fb;
pub mod present;
pub mod renderer;
pub mod view;

pub use tui_arcade_core as core;
pub use tui_arcade_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use present::{fit, present, Area, Fit, HALF_BLOCK};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use view::{ArcadeView, Hud, Viewport};
