//! Map domain: tile grid, placement components and the map query used by
//! landing validation.

mod components;
mod query;
mod tilemap;


pub use components::{Obstacle, RealPosition, TilePosition};
pub use query::{MapQuery, MapView, Occupant};
pub use tilemap::TileMap;

use bevy::prelude::*;

pub struct MapPlugin;

impl Plugin for MapPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TileMap>();
    }
}
