//! Map domain: grid placement components.

use bevy::prelude::*;

/// Logical tile an entity occupies. Updated every tick while the leader
/// is airborne, so other actors see it move.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TilePosition(pub IVec2);

/// Continuous position in tile units. Equal to the tile position except
/// mid-jump or mid-step.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct RealPosition(pub Vec2);

impl RealPosition {
    pub fn at_tile(tile: IVec2) -> Self {
        Self(tile.as_vec2())
    }

    /// Nearest tile to the continuous position.
    pub fn rounded(&self) -> IVec2 {
        self.0.round().as_ivec2()
    }
}

/// Something placed on the map that may block a landing.
#[derive(Component, Debug, Clone)]
pub struct Obstacle {
    pub label: String,
    pub blocking: bool,
}
