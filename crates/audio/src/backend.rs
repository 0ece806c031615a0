//! Audio output backends.
//!
//! The terminal has no mixer, so the real backend can only ring the bell for
//! one-shot effects. Looped sounds (thrusters) are tracked by the mixer but
//! are not audible.

use std::io::{self, Write};

use anyhow::Result;
use tracing::trace;

use crate::types::{Channel, Sound};

pub trait AudioBackend {
    fn play(&mut self, channel: Channel, sound: Sound, looped: bool) -> Result<()>;

    fn halt(&mut self, channel: Channel) -> Result<()>;
}

impl<B: AudioBackend + ?Sized> AudioBackend for Box<B> {
    fn play(&mut self, channel: Channel, sound: Sound, looped: bool) -> Result<()> {
        (**self).play(channel, sound, looped)
    }

    fn halt(&mut self, channel: Channel) -> Result<()> {
        (**self).halt(channel)
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn play(&mut self, channel: Channel, sound: Sound, looped: bool) -> Result<()> {
        trace!(channel = channel.0, sound = sound.as_str(), looped, "play (silent)");
        Ok(())
    }

    fn halt(&mut self, channel: Channel) -> Result<()> {
        trace!(channel = channel.0, "halt (silent)");
        Ok(())
    }
}

/// Rings the terminal bell (BEL) for one-shot sounds.
pub struct BellBackend<W: Write = io::Stdout> {
    out: W,
    rung: u64,
}

impl BellBackend<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> BellBackend<W> {
    pub fn new(out: W) -> Self {
        Self { out, rung: 0 }
    }

    /// How many times the bell has rung.
    pub fn rung(&self) -> u64 {
        self.rung
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioBackend for BellBackend<W> {
    fn play(&mut self, channel: Channel, sound: Sound, looped: bool) -> Result<()> {
        if looped {
            trace!(channel = channel.0, sound = sound.as_str(), "loop not audible");
            return Ok(());
        }
        self.out.write_all(b"\x07")?;
        self.out.flush()?;
        self.rung += 1;
        trace!(channel = channel.0, sound = sound.as_str(), "bell");
        Ok(())
    }

    fn halt(&mut self, _channel: Channel) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bell_rings_for_one_shots_only() {
        let mut bell = BellBackend::new(Vec::new());
        bell.play(Channel(1), Sound::Thruster, true).unwrap();
        bell.play(Channel(2), Sound::Crash, false).unwrap();
        bell.halt(Channel(1)).unwrap();
        assert_eq!(bell.rung(), 1);
        assert_eq!(bell.into_inner(), b"\x07".to_vec());
    }

    #[test]
    fn boxed_backends_forward() {
        let mut boxed: Box<dyn AudioBackend> = Box::new(SilentBackend);
        boxed.play(Channel(0), Sound::Land, false).unwrap();
        boxed.halt(Channel(0)).unwrap();
    }
}
