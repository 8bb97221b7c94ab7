//! Map domain: the narrow query surface the landing validator depends on.

use bevy::prelude::*;

use crate::core::JumpDirection;
use crate::map::tilemap::TileMap;

/// Something standing on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupant {
    pub entity: Entity,
    /// Occupants on the party's own layer block a landing
    pub blocking: bool,
}

/// Read-only view of the map used to judge landings.
pub trait MapQuery {
    fn in_bounds(&self, tile: IVec2) -> bool;
    /// Whether a mover may cross the edge of `tile` facing `direction`.
    fn is_passable(&self, tile: IVec2, direction: JumpDirection) -> bool;
    fn occupants_at(&self, tile: IVec2) -> Vec<Occupant>;
}

/// `TileMap` passability combined with a snapshot of map occupants.
pub struct MapView<'a> {
    tiles: &'a TileMap,
    occupants: Vec<(IVec2, Occupant)>,
}

impl<'a> MapView<'a> {
    pub fn new(tiles: &'a TileMap, occupants: impl IntoIterator<Item = (IVec2, Occupant)>) -> Self {
        Self {
            tiles,
            occupants: occupants.into_iter().collect(),
        }
    }
}

impl MapQuery for MapView<'_> {
    fn in_bounds(&self, tile: IVec2) -> bool {
        self.tiles.contains(tile)
    }

    fn is_passable(&self, tile: IVec2, direction: JumpDirection) -> bool {
        self.tiles.passable(tile, direction)
    }

    fn occupants_at(&self, tile: IVec2) -> Vec<Occupant> {
        self.occupants
            .iter()
            .filter(|(at, _)| *at == tile)
            .map(|(_, occupant)| *occupant)
            .collect()
    }
}
