//! Audio domain: sound cue requests and a Bevy-audio player for them.
//! Playback problems are logged here and never reach the caller.

mod cues;
mod systems;


pub use cues::{
    CueRequest, MAX_PITCH, MAX_VOLUME, MIN_PITCH, PITCH_JITTER, PlayCue, jittered_pitch,
};
pub use systems::{CueRng, cue_path};

use bevy::prelude::*;

use crate::audio::systems::{play_cues, seed_cue_rng};

pub struct CueAudioPlugin;

impl Plugin for CueAudioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CueRng>()
            .add_message::<PlayCue>()
            .add_systems(Startup, seed_cue_rng)
            .add_systems(Update, play_cues);
    }
}
