//! Append-only JSON-lines record of finished runs.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::games::GameKind;
use crate::types::Status;

/// Outcome string for a run the player quit before it ended.
pub const QUIT: &str = "quit";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub game: String,
    pub outcome: String,
    pub score: u32,
    pub frames: u64,
    pub seed: u32,
    pub unix_ms: u64,
}

impl SessionRecord {
    pub fn new(kind: GameKind, status: Status, score: u32, frames: u64, seed: u32) -> Self {
        Self {
            game: kind.as_str().to_string(),
            outcome: status
                .outcome()
                .map_or(QUIT, |o| o.as_str())
                .to_string(),
            score,
            frames,
            seed,
            unix_ms: unix_ms(),
        }
    }
}

pub fn unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Append `record` as one line to `path`, creating the file if needed.
pub fn append(path: &Path, record: &SessionRecord) -> Result<()> {
    let mut line = serde_json::to_string(record)?;
    line.push('\n');
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open session log: {}", path.display()))?;
    file.write_all(line.as_bytes())
        .with_context(|| format!("failed to write session log: {}", path.display()))?;
    Ok(())
}
