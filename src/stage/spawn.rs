//! Stage domain: building a stage's tiles, obstacles and party.

use bevy::prelude::*;

use crate::content::{JumpConfig, StageDef};
use crate::jump::{Follower, JumpData, JumpOffset, PartyLeader};
use crate::map::{Obstacle, RealPosition, TileMap, TilePosition};
use crate::stage::components::{StageEntity, StageTile, Walker};
use crate::stage::resources::{ActiveStage, PartyTrail};

const FLOOR_COLOR: Color = Color::srgb(0.35, 0.4, 0.35);
const WALL_COLOR: Color = Color::srgb(0.25, 0.25, 0.35);
const FENCE_COLOR: Color = Color::srgb(0.5, 0.38, 0.25);
const LEADER_COLOR: Color = Color::srgb(0.95, 0.85, 0.85);
const FOLLOWER_COLORS: [Color; 3] = [
    Color::srgb(0.85, 0.95, 0.85),
    Color::srgb(0.85, 0.85, 0.95),
    Color::srgb(0.95, 0.93, 0.8),
];
const BLOCKING_OBSTACLE_COLOR: Color = Color::srgb(0.55, 0.4, 0.2);
const DECOR_OBSTACLE_COLOR: Color = Color::srgba(0.4, 0.7, 0.4, 0.6);

pub(crate) const TILE_Z: f32 = 0.0;
pub(crate) const OBSTACLE_Z: f32 = 5.0;
pub(crate) const FOLLOWER_Z: f32 = 9.0;
pub(crate) const LEADER_Z: f32 = 10.0;

/// World position of a (fractional) grid position, with the map centered
/// on the origin and grid y flipped to screen y.
pub fn grid_to_world(position: Vec2, map: &TileMap, tile_size: f32) -> Vec2 {
    let center = Vec2::new(map.width() as f32 - 1.0, map.height() as f32 - 1.0) / 2.0;
    let relative = (position - center) * tile_size;
    Vec2::new(relative.x, -relative.y)
}

/// Spawn every entity of `stage` and install its tile map.
pub(crate) fn spawn_stage(
    commands: &mut Commands,
    index: usize,
    stage: &StageDef,
    config: &JumpConfig,
) {
    let map = TileMap::from_rows(&stage.rows);
    let tile = config.tile_size;
    let sprite_size = Vec2::splat(tile - 2.0);

    for position in map.tiles() {
        let color = if map.is_wall(position) {
            WALL_COLOR
        } else if map.is_fence(position) {
            FENCE_COLOR
        } else {
            FLOOR_COLOR
        };
        let world = grid_to_world(position.as_vec2(), &map, tile);
        commands.spawn((
            StageEntity,
            StageTile,
            Sprite::from_color(color, sprite_size),
            Transform::from_xyz(world.x, world.y, TILE_Z),
        ));
    }

    for obstacle in &stage.obstacles {
        let position = IVec2::new(obstacle.x, obstacle.y);
        let color = if obstacle.blocking {
            BLOCKING_OBSTACLE_COLOR
        } else {
            DECOR_OBSTACLE_COLOR
        };
        commands.spawn((
            StageEntity,
            Name::new(obstacle.label.clone()),
            Obstacle {
                label: obstacle.label.clone(),
                blocking: obstacle.blocking,
            },
            TilePosition(position),
            RealPosition::at_tile(position),
            Sprite::from_color(color, sprite_size * 0.8),
            Transform::from_xyz(0.0, 0.0, OBSTACLE_Z),
        ));
    }

    let start = IVec2::new(stage.party_start.0, stage.party_start.1);
    commands.spawn((
        StageEntity,
        Name::new("PartyLeader"),
        PartyLeader,
        Walker::default(),
        TilePosition(start),
        RealPosition::at_tile(start),
        JumpData::default(),
        JumpOffset::default(),
        Sprite::from_color(LEADER_COLOR, Vec2::splat(tile * 0.6)),
        Transform::from_xyz(0.0, 0.0, LEADER_Z),
    ));

    for index in 0..stage.followers {
        let color = FOLLOWER_COLORS[index as usize % FOLLOWER_COLORS.len()];
        commands.spawn((
            StageEntity,
            Name::new(format!("Follower{index}")),
            Follower { index },
            TilePosition(start),
            RealPosition::at_tile(start),
            JumpData::default(),
            JumpOffset::default(),
            Sprite::from_color(color, Vec2::splat(tile * 0.5)),
            Transform::from_xyz(0.0, 0.0, FOLLOWER_Z - index as f32 * 0.1),
            Visibility::Visible,
        ));
    }

    info!(
        "Spawned stage '{}' ({}x{}, {} followers, {} obstacles)",
        stage.name,
        map.width(),
        map.height(),
        stage.followers,
        stage.obstacles.len()
    );

    commands.insert_resource(PartyTrail::new(start, stage.followers as usize));
    commands.insert_resource(ActiveStage {
        index,
        id: stage.id.clone(),
    });
    commands.insert_resource(map);
}
