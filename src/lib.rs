//! Terminal arcade (workspace facade crate).
//!
//! Re-exports the workspace crates under short names and adds what the
//! binaries share: configuration, logging, the session log and the
//! fixed-tick runner.

pub use tui_arcade_audio as audio;
pub use tui_arcade_core as core;
pub use tui_arcade_games as games;
pub use tui_arcade_input as input;
pub use tui_arcade_term as term;
pub use tui_arcade_types as types;

pub mod config;
pub mod logging;
pub mod runner;
pub mod session;

pub use config::{ArcadeConfig, AudioMode, ConfigError, RunArgs};
pub use runner::{launch, run, Cabinet, RunSummary};
