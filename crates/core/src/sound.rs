//! Per-tick sound cue queue and looped-voice bookkeeping.

use arrayvec::ArrayVec;

use crate::types::{Channel, Sound, SoundCue};

/// Maximum cues one tick may emit. Extra cues are dropped.
pub const SOUND_QUEUE_CAPACITY: usize = 16;

#[derive(Debug, Clone, Default)]
pub struct SoundQueue {
    cues: ArrayVec<SoundCue, SOUND_QUEUE_CAPACITY>,
}

impl SoundQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn play(&mut self, channel: Channel, sound: Sound) {
        self.push(SoundCue::Play {
            channel,
            sound,
            looped: false,
        });
    }

    pub fn play_looped(&mut self, channel: Channel, sound: Sound) {
        self.push(SoundCue::Play {
            channel,
            sound,
            looped: true,
        });
    }

    pub fn halt(&mut self, channel: Channel) {
        self.push(SoundCue::Halt { channel });
    }

    pub fn push(&mut self, cue: SoundCue) {
        let _ = self.cues.try_push(cue);
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn as_slice(&self) -> &[SoundCue] {
        &self.cues
    }

    pub fn drain(&mut self) -> impl Iterator<Item = SoundCue> + '_ {
        self.cues.drain(..)
    }
}

/// A looped sound that is switched on and off by a per-tick condition, like
/// a thruster hiss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopVoice {
    channel: Channel,
    sound: Sound,
    playing: bool,
}

impl LoopVoice {
    pub const fn new(channel: Channel, sound: Sound) -> Self {
        Self {
            channel,
            sound,
            playing: false,
        }
    }

    pub fn playing(&self) -> bool {
        self.playing
    }

    /// Start when `active` and allowed to start, stop when no longer active.
    /// An already running loop keeps going while `active` even if
    /// `can_start` turned false.
    pub fn update(&mut self, active: bool, can_start: bool, sfx: &mut SoundQueue) {
        if active && !self.playing && can_start {
            sfx.play_looped(self.channel, self.sound);
            self.playing = true;
        } else if !active && self.playing {
            sfx.halt(self.channel);
            self.playing = false;
        }
    }

    pub fn silence(&mut self, sfx: &mut SoundQueue) {
        if self.playing {
            sfx.halt(self.channel);
            self.playing = false;
        }
    }
}
