//! Charge-based directional party jump for a tile-based 2D game.
//!
//! Hold the jump button to charge, aim with the arrows, WASD or a stick,
//! and release to hop the whole party onto the landing tile.

pub mod audio;
pub mod content;
pub mod core;
#[cfg(feature = "dev-tools")]
pub mod debug;
pub mod input;
pub mod jump;
pub mod map;
pub mod stage;
pub mod ui;

use bevy::prelude::*;

/// The mechanic without any demo presentation: tick clock, tuning,
/// map query, input fusion, cue playback and the jump itself.
pub struct PartyJumpPlugin;

impl Plugin for PartyJumpPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            core::CorePlugin,
            content::ContentPlugin,
            map::MapPlugin,
            input::JumpInputPlugin,
            audio::CueAudioPlugin,
            jump::JumpPlugin,
        ));
    }
}
