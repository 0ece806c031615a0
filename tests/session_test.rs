//! Config, session log and audio wiring outside the terminal.

use std::fs;

use tui_arcade::audio::BellBackend;
use tui_arcade::games::{Game, GameKind};
use tui_arcade::session::{self, SessionRecord};
use tui_arcade::types::{Controls, Outcome, Status, TICK_MS};
use tui_arcade::{ArcadeConfig, AudioMode, Cabinet, ConfigError, RunArgs};

fn crash_lander() -> Cabinet<BellBackend<Vec<u8>>> {
    let mut cabinet = Cabinet::new(GameKind::Lander, 5, TICK_MS, BellBackend::new(Vec::new()));
    for _ in 0..2000 {
        if cabinet.step(Controls::NONE).unwrap().is_over() {
            break;
        }
    }
    cabinet
}

#[test]
fn crash_rings_the_bell_once() {
    let cabinet = crash_lander();
    assert_eq!(cabinet.game().status(), Status::Over(Outcome::Crashed));
    assert_eq!(cabinet.mixer().backend().rung(), 1);
}

#[test]
fn finished_runs_append_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sessions.jsonl");

    let summary = crash_lander().finish().unwrap();
    session::append(&path, &summary.record()).unwrap();
    let quit = Cabinet::new(GameKind::Paint, 8, TICK_MS, BellBackend::new(Vec::new()))
        .finish()
        .unwrap();
    session::append(&path, &quit.record()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let records: Vec<SessionRecord> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].game, "lander");
    assert_eq!(records[0].outcome, "crashed");
    assert_eq!(records[0].seed, 5);
    assert_eq!(records[0].frames, summary.frames);

    assert_eq!(records[1].game, "paint");
    assert_eq!(records[1].outcome, session::QUIT);
    assert_eq!(records[1].frames, 0);
}

#[test]
fn append_reports_unwritable_paths() {
    let dir = tempfile::tempdir().unwrap();
    let record = Cabinet::new(GameKind::Paint, 1, TICK_MS, BellBackend::new(Vec::new()))
        .finish()
        .unwrap()
        .record();
    let err = session::append(&dir.path().join("missing").join("log.jsonl"), &record).unwrap_err();
    assert!(err.to_string().contains("session log"));
}

#[test]
fn config_layers_environment_then_flags() {
    let env = |key: &str| match key {
        "ARCADE_AUDIO" => Some("off".to_string()),
        "ARCADE_TICK_MS" => Some("25".to_string()),
        _ => None,
    };
    let config = ArcadeConfig::from_lookup(env).unwrap();
    assert_eq!(config.audio, AudioMode::Off);
    assert_eq!(config.tick_ms, 25);

    let args = RunArgs {
        audio: Some(AudioMode::Bell),
        seed: Some(77),
        ..RunArgs::default()
    };
    let config = config.with_args(&args).unwrap();
    assert_eq!(config.audio, AudioMode::Bell);
    assert_eq!(config.tick_ms, 25);
    assert_eq!(config.resolve_seed(), 77);

    let bad = |key: &str| (key == "ARCADE_TICK_MS").then(|| "1001".to_string());
    assert_eq!(
        ArcadeConfig::from_lookup(bad),
        Err(ConfigError::TickOutOfRange(1001))
    );
}
