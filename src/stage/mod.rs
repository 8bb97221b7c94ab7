//! Stage domain: a playable demo stage for the party jump. Loads stages
//! from the catalog, walks the leader tile by tile, trails the followers
//! and draws everything from grid positions.

mod components;
mod resources;
mod spawn;
mod systems;


pub use components::{StageEntity, StageTile, Stride, Walker};
pub use resources::{ActiveStage, PartyTrail};
pub use spawn::grid_to_world;
pub use systems::{STRIDE_TICKS, step_target};

use bevy::prelude::*;

use crate::core::TickSet;
use crate::jump::advance_jump_motion;
use crate::stage::systems::{
    follow_leader, record_trail, simulate_save_load, spawn_first_stage, switch_stage,
    sync_transforms, toggle_followers, walk_leader,
};

pub struct StagePlugin;

impl Plugin for StagePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveStage>()
            .add_systems(Startup, spawn_first_stage)
            .add_systems(
                FixedUpdate,
                (walk_leader, record_trail, follow_leader)
                    .chain()
                    .in_set(TickSet::Motion)
                    .before(advance_jump_motion),
            )
            .add_systems(
                Update,
                (
                    switch_stage,
                    simulate_save_load,
                    toggle_followers,
                    sync_transforms,
                ),
            );
    }
}
