//! Input domain: pure reduction of device samples into one jump intent.

use bevy::prelude::*;

use crate::core::JumpDirection;
use crate::input::devices::DeviceSample;

/// The fused jump intent for the current tick.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JumpInput {
    pub activation_held: bool,
    pub direction: JumpDirection,
}

/// OR every device together, cancel opposing axes, then resolve the
/// heading (diagonals first, since both axes are already known).
pub fn fuse(samples: impl IntoIterator<Item = DeviceSample>, directional: bool) -> JumpInput {
    let merged = samples
        .into_iter()
        .fold(DeviceSample::IDLE, |acc, sample| DeviceSample {
            activation: acc.activation || sample.activation,
            up: acc.up || sample.up,
            down: acc.down || sample.down,
            left: acc.left || sample.left,
            right: acc.right || sample.right,
        });

    let direction = if directional {
        JumpDirection::from_axes(axis(merged.left, merged.right), axis(merged.up, merged.down))
    } else {
        JumpDirection::None
    };

    JumpInput {
        activation_held: merged.activation,
        direction,
    }
}

/// -1, 0 or 1 along one axis; both sides held cancel out.
fn axis(negative: bool, positive: bool) -> i32 {
    match (negative, positive) {
        (true, false) => -1,
        (false, true) => 1,
        _ => 0,
    }
}
