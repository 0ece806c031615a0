//! Channel mixer and audio output.
//!
//! Games emit [`SoundCue`](crate::types::SoundCue)s; the runner feeds them
//! through a [`ChannelMixer`], which keeps track of what every channel is
//! playing and forwards to an [`AudioBackend`].

pub mod backend;
pub mod mixer;

pub use tui_arcade_types as types;

pub use backend::{AudioBackend, BellBackend, SilentBackend};
pub use mixer::{ChannelMixer, Voice};
