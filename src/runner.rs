//! Fixed-tick main loop.
//!
//! [`Cabinet`] is the terminal-free part: one game, its pixel buffer, its
//! sound queue and the channel mixer. [`run`] wraps it with crossterm input,
//! the terminal renderer and frame pacing.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use tracing::{debug, info};

use crate::audio::{AudioBackend, BellBackend, ChannelMixer, SilentBackend};
use crate::config::{ArcadeConfig, AudioMode, RunArgs};
use crate::core::{PixelBuffer, SoundQueue};
use crate::games::{Game, GameKind};
use crate::input::{should_quit, KeyTracker};
use crate::logging;
use crate::session::{self, SessionRecord};
use crate::term::{ArcadeView, FrameBuffer, Hud, TerminalRenderer, Viewport};
use crate::types::{Controls, Status, OUTCOME_LINGER_MS, SCREEN_HEIGHT, SCREEN_WIDTH};

/// A game wired to its frame and audio.
pub struct Cabinet<B> {
    kind: GameKind,
    seed: u32,
    game: Box<dyn Game>,
    pb: PixelBuffer,
    sfx: SoundQueue,
    mixer: ChannelMixer<B>,
}

impl<B: AudioBackend> Cabinet<B> {
    pub fn new(kind: GameKind, seed: u32, tick_ms: u32, backend: B) -> Self {
        info!(game = kind.as_str(), seed, tick_ms, "game start");
        Self {
            kind,
            seed,
            game: kind.create(seed, tick_ms),
            pb: PixelBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            sfx: SoundQueue::new(),
            mixer: ChannelMixer::new(backend),
        }
    }

    pub fn kind(&self) -> GameKind {
        self.kind
    }

    pub fn game(&self) -> &dyn Game {
        self.game.as_ref()
    }

    pub fn mixer(&self) -> &ChannelMixer<B> {
        &self.mixer
    }

    /// Advance one tick and play whatever it queued.
    pub fn step(&mut self, controls: Controls) -> Result<Status> {
        let was_over = self.game.status().is_over();
        let status = self.game.tick(controls, &mut self.sfx);
        for cue in self.sfx.drain() {
            self.mixer.apply(cue)?;
        }
        if !was_over {
            if let Status::Over(outcome) = status {
                info!(
                    game = self.kind.as_str(),
                    outcome = outcome.as_str(),
                    score = self.game.score(),
                    frames = self.game.frames(),
                    "game over"
                );
            }
        }
        Ok(status)
    }

    /// Draw the current state and return the frame.
    pub fn frame(&mut self) -> &PixelBuffer {
        self.game.render(&mut self.pb);
        &self.pb
    }

    pub fn hud(&self) -> Hud<'static> {
        Hud {
            title: self.game.title(),
            help: self.game.help(),
            score: self.game.score(),
            status: self.game.status(),
        }
    }

    /// Stop every channel, then summarize the run.
    pub fn finish(mut self) -> Result<RunSummary> {
        self.mixer.silence_all()?;
        Ok(RunSummary {
            kind: self.kind,
            seed: self.seed,
            status: self.game.status(),
            score: self.game.score(),
            frames: self.game.frames(),
        })
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub kind: GameKind,
    pub seed: u32,
    pub status: Status,
    pub score: u32,
    pub frames: u64,
}

impl RunSummary {
    /// One line for stdout after the terminal is restored.
    pub fn message(&self) -> String {
        match self.status.outcome() {
            Some(outcome) => format!("{} Score: {}", outcome.message(), self.score),
            None => format!("Quit. Score: {}", self.score),
        }
    }

    pub fn record(&self) -> SessionRecord {
        SessionRecord::new(self.kind, self.status, self.score, self.frames, self.seed)
    }
}

/// Play `kind` in the terminal until it ends or the player quits.
pub fn run(kind: GameKind, config: &ArcadeConfig) -> Result<RunSummary> {
    let seed = config.resolve_seed();
    let backend: Box<dyn AudioBackend> = match config.audio {
        AudioMode::Bell => Box::new(BellBackend::stdout()),
        AudioMode::Off => Box::new(SilentBackend),
    };
    let mut cabinet = Cabinet::new(kind, seed, config.tick_ms, backend);

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = play(&mut term, &mut cabinet, config);
    // Always try to restore terminal state.
    let _ = term.exit();
    result?;

    let summary = cabinet.finish()?;
    if let Some(path) = &config.session_log {
        session::append(path, &summary.record())?;
    }
    Ok(summary)
}

/// Binary entry point: environment, then flags, then [`run`]. Prints the
/// outcome once the terminal is restored.
pub fn launch(kind: GameKind, args: &RunArgs) -> Result<()> {
    let config = ArcadeConfig::from_env()?.with_args(args)?;
    logging::init(config.log_path.as_deref())?;
    let summary = run(kind, &config)?;
    println!("{}", summary.message());
    Ok(())
}

fn play<B: AudioBackend>(
    term: &mut TerminalRenderer,
    cabinet: &mut Cabinet<B>,
    config: &ArcadeConfig,
) -> Result<()> {
    let mut tracker = if term.reports_key_releases() {
        KeyTracker::new().with_release_events()
    } else {
        KeyTracker::new().with_key_release_timeout_ms(config.key_release_ms)
    };
    debug!(
        release_timeout_ms = ?tracker.key_release_timeout_ms(),
        "input ready"
    );

    let view = ArcadeView::default();
    let mut fb = FrameBuffer::new(1, 1);
    let tick_duration = Duration::from_millis(u64::from(config.tick_ms));
    let linger = Duration::from_millis(u64::from(OUTCOME_LINGER_MS));

    let start = Instant::now();
    let mut last_tick = Instant::now();
    let mut over_since: Option<Instant> = None;

    loop {
        // Render.
        let (w, h) = term.size().unwrap_or((80, 24));
        let hud = cabinet.hud();
        view.render_into(&hud, cabinet.frame(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        if let Some(since) = over_since {
            if since.elapsed() >= linger {
                return Ok(());
            }
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    tracker.handle_key_event(key, elapsed_ms(start));
                }
                Event::Resize(..) => term.invalidate(),
                Event::FocusLost => tracker.reset(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            let controls = tracker.take_controls(elapsed_ms(start));
            let status = cabinet.step(controls)?;
            if status.is_over() && over_since.is_none() {
                over_since = Some(Instant::now());
            }
        }
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
