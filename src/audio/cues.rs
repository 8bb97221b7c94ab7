//! Audio domain: cue requests and their shaping.

use bevy::ecs::message::Message;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::content::CueDef;

pub const MIN_PITCH: u8 = 50;
pub const MAX_PITCH: u8 = 150;
pub const MAX_VOLUME: u8 = 100;
/// Largest pitch nudge applied to jittered cues, either way.
pub const PITCH_JITTER: i16 = 5;

/// A sound effect to play, volume 0..=100 and pitch 50..=150.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueRequest {
    pub name: String,
    pub volume: u8,
    pub pitch: u8,
}

impl CueRequest {
    pub fn from_def(def: &CueDef) -> Self {
        Self {
            name: def.name.clone(),
            volume: def.volume.min(MAX_VOLUME),
            pitch: def.pitch.clamp(MIN_PITCH, MAX_PITCH),
        }
    }

    pub fn louder(mut self, amount: u32) -> Self {
        self.volume = (self.volume as u32 + amount).min(MAX_VOLUME as u32) as u8;
        self
    }

    pub fn higher(mut self, amount: u32) -> Self {
        self.pitch = (self.pitch as u32 + amount).clamp(MIN_PITCH as u32, MAX_PITCH as u32) as u8;
        self
    }
}

/// Request to play a cue. `jitter` asks for a small random pitch nudge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayCue {
    pub cue: CueRequest,
    pub jitter: bool,
}

impl Message for PlayCue {}

/// Pitch nudged by up to `PITCH_JITTER` either way, kept in range.
pub fn jittered_pitch(pitch: u8, rng: &mut ChaCha8Rng) -> u8 {
    let nudge = rng.random_range(-PITCH_JITTER..=PITCH_JITTER);
    (pitch as i16 + nudge).clamp(MIN_PITCH as i16, MAX_PITCH as i16) as u8
}
