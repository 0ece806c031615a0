//! Fixed set of numbered audio channels.

use anyhow::{bail, Result};
use tracing::debug;

use crate::backend::AudioBackend;
use crate::types::{Channel, Sound, SoundCue, MIXER_CHANNELS};

/// What a channel is currently playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Voice {
    pub sound: Sound,
    pub looped: bool,
}

/// Routes [`SoundCue`]s to a backend and remembers per-channel state.
///
/// Playing on a busy channel replaces what was there. Halting an idle
/// channel does nothing and never reaches the backend.
#[derive(Debug)]
pub struct ChannelMixer<B> {
    channels: [Option<Voice>; MIXER_CHANNELS],
    backend: B,
}

impl<B: AudioBackend> ChannelMixer<B> {
    pub fn new(backend: B) -> Self {
        Self {
            channels: [None; MIXER_CHANNELS],
            backend,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn voice(&self, channel: Channel) -> Option<Voice> {
        self.channels.get(channel.0 as usize).copied().flatten()
    }

    pub fn busy_channels(&self) -> usize {
        self.channels.iter().filter(|c| c.is_some()).count()
    }

    pub fn apply(&mut self, cue: SoundCue) -> Result<()> {
        match cue {
            SoundCue::Play {
                channel,
                sound,
                looped,
            } => {
                let slot = self.slot(channel)?;
                *slot = Some(Voice { sound, looped });
                self.backend.play(channel, sound, looped)
            }
            SoundCue::Halt { channel } => {
                let slot = self.slot(channel)?;
                if slot.take().is_none() {
                    return Ok(());
                }
                self.backend.halt(channel)
            }
        }
    }

    /// Halt every busy channel.
    pub fn silence_all(&mut self) -> Result<()> {
        for idx in 0..MIXER_CHANNELS {
            if self.channels[idx].take().is_some() {
                self.backend.halt(Channel(idx as u8))?;
            }
        }
        debug!("mixer silenced");
        Ok(())
    }

    fn slot(&mut self, channel: Channel) -> Result<&mut Option<Voice>> {
        match self.channels.get_mut(channel.0 as usize) {
            Some(slot) => Ok(slot),
            None => bail!(
                "audio channel {} out of range (0..{})",
                channel.0,
                MIXER_CHANNELS
            ),
        }
    }
}
