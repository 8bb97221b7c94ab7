//! Input domain: input sampling for the jump charge.

use bevy::prelude::*;

use crate::content::JumpConfig;
use crate::input::devices::{ArrowKeys, InputDevice, PadDevice, WasdKeys};
use crate::input::fusion::{JumpInput, fuse};

pub(crate) fn sample_jump_input(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    gamepads: Query<&Gamepad>,
    config: Res<JumpConfig>,
    mut input: ResMut<JumpInput>,
) {
    let settings = &config.input;
    let mut samples = Vec::new();

    if let Some(keyboard) = keyboard.as_deref() {
        samples.push(ArrowKeys(keyboard).sample(settings));
        samples.push(WasdKeys(keyboard).sample(settings));
    }
    for pad in &gamepads {
        samples.push(PadDevice(pad).sample(settings));
    }

    *input = fuse(samples, settings.enable_directional);
}
