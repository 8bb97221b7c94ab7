//! Stage domain: markers and walking state for the demo stage.

use bevy::prelude::*;

/// Everything spawned for the current stage; despawned on stage switch.
#[derive(Component, Debug)]
pub struct StageEntity;

/// Floor, wall or fence sprite
#[derive(Component, Debug)]
pub struct StageTile;

/// One tile step in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stride {
    pub from: IVec2,
    pub to: IVec2,
    pub elapsed: u32,
}

/// Regular tile-by-tile walking of the party leader.
#[derive(Component, Debug, Default)]
pub struct Walker {
    pub stride: Option<Stride>,
}
