//! Audio domain: playback of cue requests through Bevy audio.

use bevy::audio::Volume;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

use crate::audio::cues::{PlayCue, jittered_pitch};
use crate::content::{JumpConfig, asset_root};

const SOUND_DIR: &str = "audio/se";

/// Seeded RNG for cue jitter, so a replayed input sequence sounds the same.
#[derive(Resource)]
pub struct CueRng(pub ChaCha8Rng);

impl CueRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for CueRng {
    fn default() -> Self {
        Self::from_seed(JumpConfig::default().sound.jitter_seed)
    }
}

/// Reseed once content is loaded.
pub(crate) fn seed_cue_rng(config: Res<JumpConfig>, mut rng: ResMut<CueRng>) {
    *rng = CueRng::from_seed(config.sound.jitter_seed);
}

pub fn cue_path(name: &str) -> String {
    format!("{SOUND_DIR}/{name}.ogg")
}

pub(crate) fn play_cues(
    mut commands: Commands,
    asset_server: Option<Res<AssetServer>>,
    mut requests: MessageReader<PlayCue>,
    mut rng: ResMut<CueRng>,
    mut missing: Local<HashSet<String>>,
) {
    for request in requests.read() {
        let cue = &request.cue;
        let pitch = if request.jitter {
            jittered_pitch(cue.pitch, &mut rng.0)
        } else {
            cue.pitch
        };

        let Some(asset_server) = asset_server.as_deref() else {
            debug!("No asset server, dropping cue {}", cue.name);
            continue;
        };

        let path = cue_path(&cue.name);
        if !asset_root().join(&path).exists() {
            if missing.insert(path.clone()) {
                warn!("Sound effect {} not found, cue skipped", path);
            }
            continue;
        }

        commands.spawn((
            AudioPlayer::new(asset_server.load(path)),
            PlaybackSettings::DESPAWN
                .with_volume(Volume::Linear(cue.volume as f32 / 100.0))
                .with_speed(pitch as f32 / 100.0),
        ));
    }
}
