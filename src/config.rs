//! Run configuration: environment variables first, then command-line flags.
//!
//! | Env | Flag | Default |
//! |-----|------|---------|
//! | `ARCADE_SEED` | `--seed` | derived from the wall clock |
//! | `ARCADE_TICK_MS` | `--tick-ms` | 16 |
//! | `ARCADE_KEY_RELEASE_MS` | `--key-release-ms` | 150 |
//! | `ARCADE_AUDIO` | `--audio` | `bell` |
//! | `ARCADE_LOG_PATH` | `--log-path` | none |
//! | `ARCADE_SESSION_LOG` | `--session-log` | none |

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Args, ValueEnum};

use crate::input::DEFAULT_KEY_RELEASE_TIMEOUT_MS;
use crate::types::TICK_MS;

pub const MAX_TICK_MS: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AudioMode {
    /// Terminal bell for one-shot sounds.
    #[default]
    Bell,
    Off,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidNumber { key: &'static str, value: String },
    InvalidAudio(String),
    TickOutOfRange(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key}: `{value}` is not a valid number")
            }
            ConfigError::InvalidAudio(value) => {
                write!(f, "ARCADE_AUDIO: `{value}` is not one of bell, off")
            }
            ConfigError::TickOutOfRange(ms) => {
                write!(f, "tick of {ms} ms is outside 1..={MAX_TICK_MS}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Flags shared by `arcade <game>` and the per-game binaries.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// RNG seed (decimal or 0x-prefixed hex)
    #[arg(long, value_parser = parse_seed_arg)]
    pub seed: Option<u32>,
    /// Simulation step in milliseconds
    #[arg(long)]
    pub tick_ms: Option<u32>,
    /// Auto-release held keys after this long without a repeat
    #[arg(long)]
    pub key_release_ms: Option<u32>,
    #[arg(long, value_enum)]
    pub audio: Option<AudioMode>,
    /// Write tracing output to this file
    #[arg(long)]
    pub log_path: Option<PathBuf>,
    /// Append one JSON line per finished run to this file
    #[arg(long)]
    pub session_log: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcadeConfig {
    pub seed: Option<u32>,
    pub tick_ms: u32,
    pub key_release_ms: u32,
    pub audio: AudioMode,
    pub log_path: Option<PathBuf>,
    pub session_log: Option<PathBuf>,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tick_ms: TICK_MS,
            key_release_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            audio: AudioMode::Bell,
            log_path: None,
            session_log: None,
        }
    }
}

impl ArcadeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let mut config = Self::default();

        if let Some(value) = var("ARCADE_SEED") {
            config.seed = Some(parse_seed(&value).ok_or(ConfigError::InvalidNumber {
                key: "ARCADE_SEED",
                value,
            })?);
        }
        if let Some(value) = var("ARCADE_TICK_MS") {
            config.tick_ms = parse_number("ARCADE_TICK_MS", value)?;
        }
        if let Some(value) = var("ARCADE_KEY_RELEASE_MS") {
            config.key_release_ms = parse_number("ARCADE_KEY_RELEASE_MS", value)?;
        }
        if let Some(value) = var("ARCADE_AUDIO") {
            config.audio =
                AudioMode::from_str(&value, true).map_err(|_| ConfigError::InvalidAudio(value))?;
        }
        config.log_path = var("ARCADE_LOG_PATH").map(PathBuf::from);
        config.session_log = var("ARCADE_SESSION_LOG").map(PathBuf::from);

        config.validate()?;
        Ok(config)
    }

    /// Flags win over the environment.
    pub fn with_args(mut self, args: &RunArgs) -> Result<Self, ConfigError> {
        if let Some(seed) = args.seed {
            self.seed = Some(seed);
        }
        if let Some(tick_ms) = args.tick_ms {
            self.tick_ms = tick_ms;
        }
        if let Some(ms) = args.key_release_ms {
            self.key_release_ms = ms;
        }
        if let Some(audio) = args.audio {
            self.audio = audio;
        }
        if let Some(path) = &args.log_path {
            self.log_path = Some(path.clone());
        }
        if let Some(path) = &args.session_log {
            self.session_log = Some(path.clone());
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 || self.tick_ms > MAX_TICK_MS {
            return Err(ConfigError::TickOutOfRange(self.tick_ms));
        }
        Ok(())
    }

    /// The configured seed, or one taken from the clock.
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

fn parse_number(key: &'static str, value: String) -> Result<u32, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { key, value })
}

/// Decimal or `0x`-prefixed hex.
pub fn parse_seed(s: &str) -> Option<u32> {
    let s = s.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

fn parse_seed_arg(s: &str) -> Result<u32, String> {
    parse_seed(s).ok_or_else(|| format!("`{s}` is not a decimal or 0x-prefixed hex seed"))
}

fn clock_seed() -> u32 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    (nanos ^ (nanos >> 32)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = ArcadeConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ArcadeConfig::default());
        assert_eq!(config.tick_ms, 16);
        assert_eq!(config.key_release_ms, 150);
    }

    #[test]
    fn reads_every_variable() {
        let config = ArcadeConfig::from_lookup(lookup(&[
            ("ARCADE_SEED", "0x2A"),
            ("ARCADE_TICK_MS", "20"),
            ("ARCADE_KEY_RELEASE_MS", " 90 "),
            ("ARCADE_AUDIO", "OFF"),
            ("ARCADE_LOG_PATH", "/tmp/arcade.log"),
            ("ARCADE_SESSION_LOG", ""),
        ]))
        .unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.tick_ms, 20);
        assert_eq!(config.key_release_ms, 90);
        assert_eq!(config.audio, AudioMode::Off);
        assert_eq!(config.log_path, Some(PathBuf::from("/tmp/arcade.log")));
        assert_eq!(config.session_log, None);
    }

    #[test]
    fn bad_values_are_errors() {
        let err = ArcadeConfig::from_lookup(lookup(&[("ARCADE_TICK_MS", "fast")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                key: "ARCADE_TICK_MS",
                value: "fast".to_string()
            }
        );

        let err = ArcadeConfig::from_lookup(lookup(&[("ARCADE_TICK_MS", "0")])).unwrap_err();
        assert_eq!(err, ConfigError::TickOutOfRange(0));

        let err = ArcadeConfig::from_lookup(lookup(&[("ARCADE_AUDIO", "loud")])).unwrap_err();
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn flags_override_environment() {
        let config = ArcadeConfig::from_lookup(lookup(&[("ARCADE_SEED", "7")])).unwrap();
        let args = RunArgs {
            seed: Some(9),
            tick_ms: Some(33),
            audio: Some(AudioMode::Off),
            ..RunArgs::default()
        };
        let config = config.with_args(&args).unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.tick_ms, 33);
        assert_eq!(config.audio, AudioMode::Off);
        assert_eq!(config.resolve_seed(), 9);

        let args = RunArgs {
            tick_ms: Some(5000),
            ..RunArgs::default()
        };
        assert_eq!(
            ArcadeConfig::default().with_args(&args),
            Err(ConfigError::TickOutOfRange(5000))
        );
    }

    #[test]
    fn seeds_parse_in_decimal_and_hex() {
        assert_eq!(parse_seed("123"), Some(123));
        assert_eq!(parse_seed("0xff"), Some(255));
        assert_eq!(parse_seed("0XFF"), Some(255));
        assert_eq!(parse_seed("-1"), None);
        assert_eq!(parse_seed("0x"), None);
    }
}
