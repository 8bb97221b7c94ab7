//! Input domain: keyboard, WASD and gamepad fused into one jump intent.

mod devices;
mod fusion;
mod systems;


pub use devices::{ArrowKeys, DeviceSample, InputDevice, PadDevice, WasdKeys};
pub use fusion::{JumpInput, fuse};

use bevy::prelude::*;

use crate::core::TickSet;
use crate::input::systems::sample_jump_input;

pub struct JumpInputPlugin;

impl Plugin for JumpInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<JumpInput>()
            .add_systems(FixedUpdate, sample_jump_input.in_set(TickSet::Input));
    }
}
