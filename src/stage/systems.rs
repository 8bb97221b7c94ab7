//! Stage domain: stage switching, walking, follower trail and rendering sync.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::content::{JumpConfig, StageCatalog};
use crate::core::{
    InteractionLocks, JumpDirection, LOCK_WALKING, MapChangedEvent, SaveLoadedEvent,
};
use crate::input::JumpInput;
use crate::jump::{ChargeSession, Follower, JumpData, JumpOffset, PartyLeader, PendingJump};
use crate::map::{Obstacle, RealPosition, TileMap, TilePosition};
use crate::stage::components::{StageEntity, Stride, Walker};
use crate::stage::resources::{ActiveStage, PartyTrail};
use crate::stage::spawn::{grid_to_world, spawn_stage};

/// Ticks to walk one tile.
pub const STRIDE_TICKS: u32 = 8;

pub(crate) fn spawn_first_stage(
    mut commands: Commands,
    catalog: Res<StageCatalog>,
    config: Res<JumpConfig>,
) {
    spawn_stage(&mut commands, 0, catalog.get_wrapped(0), &config);
}

/// N cycles to the next stage and announces the map change.
pub(crate) fn switch_stage(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    catalog: Res<StageCatalog>,
    config: Res<JumpConfig>,
    active: Res<ActiveStage>,
    stage_entities: Query<Entity, With<StageEntity>>,
    mut map_changed: MessageWriter<MapChangedEvent>,
) {
    if !keyboard.just_pressed(KeyCode::KeyN) {
        return;
    }

    for entity in &stage_entities {
        commands.entity(entity).despawn();
    }

    let index = (active.index + 1) % catalog.len().max(1);
    let stage = catalog.get_wrapped(index);
    spawn_stage(&mut commands, index, stage, &config);
    map_changed.write(MapChangedEvent {
        map_id: stage.id.clone(),
    });
}

/// F9 stands in for restoring a save.
pub(crate) fn simulate_save_load(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut loaded: MessageWriter<SaveLoadedEvent>,
) {
    if keyboard.just_pressed(KeyCode::F9) {
        info!("Simulated save load");
        loaded.write(SaveLoadedEvent);
    }
}

/// G hides or shows the followers; hidden followers sit out jumps.
pub(crate) fn toggle_followers(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut followers: Query<&mut Visibility, With<Follower>>,
) {
    if !keyboard.just_pressed(KeyCode::KeyG) {
        return;
    }
    for mut visibility in &mut followers {
        *visibility = match *visibility {
            Visibility::Hidden => Visibility::Visible,
            _ => Visibility::Hidden,
        };
    }
}

/// Tile the leader would step onto, if the step is allowed.
pub fn step_target(
    map: &TileMap,
    from: IVec2,
    direction: JumpDirection,
    blocked: impl Fn(IVec2) -> bool,
) -> Option<IVec2> {
    if direction.is_none() {
        return None;
    }
    let to = from + direction.delta();
    let open = map.passable(from, direction) && map.passable(to, direction.reverse());
    (open && !blocked(to)).then_some(to)
}

pub(crate) fn walk_leader(
    input: Res<JumpInput>,
    session: Res<ChargeSession>,
    tiles: Res<TileMap>,
    mut locks: ResMut<InteractionLocks>,
    obstacles: Query<(&TilePosition, &Obstacle), Without<PartyLeader>>,
    mut leader: Query<
        (&mut Walker, &mut TilePosition, &mut RealPosition, &JumpData),
        With<PartyLeader>,
    >,
) {
    let Ok((mut walker, mut tile, mut real, jump)) = leader.single_mut() else {
        locks.unlock(LOCK_WALKING);
        return;
    };

    if let Some(mut stride) = walker.stride {
        stride.elapsed += 1;
        let t = stride.elapsed as f32 / STRIDE_TICKS as f32;
        real.0 = stride.from.as_vec2().lerp(stride.to.as_vec2(), t.min(1.0));
        if stride.elapsed >= STRIDE_TICKS {
            real.0 = stride.to.as_vec2();
            walker.stride = None;
            locks.unlock(LOCK_WALKING);
        } else {
            walker.stride = Some(stride);
        }
        return;
    }

    let busy = session.charging || session.executing || jump.active;
    if busy || input.activation_held || locks.is_locked() {
        return;
    }

    let blocked = |at: IVec2| {
        obstacles
            .iter()
            .any(|(position, obstacle)| obstacle.blocking && position.0 == at)
    };
    if let Some(to) = step_target(&tiles, tile.0, input.direction, blocked) {
        walker.stride = Some(Stride {
            from: tile.0,
            to,
            elapsed: 0,
        });
        tile.0 = to;
        locks.lock(LOCK_WALKING);
    }
}

/// Only grounded tiles enter the trail; tiles crossed mid-air are skipped.
pub(crate) fn record_trail(
    leader: Query<(&TilePosition, &JumpData), With<PartyLeader>>,
    trail: Option<ResMut<PartyTrail>>,
) {
    let (Ok((tile, jump)), Some(mut trail)) = (leader.single(), trail) else {
        return;
    };
    if jump.active {
        return;
    }
    if trail.record(tile.0) {
        debug!("Leader moved to {}", tile.0);
    }
}

/// Grounded followers walk towards their slot on the trail. A follower's
/// tile only changes when it reaches its slot, so it always names a tile
/// the leader stood on.
pub(crate) fn follow_leader(
    trail: Option<Res<PartyTrail>>,
    leader: Query<&TilePosition, With<PartyLeader>>,
    mut followers: Query<
        (
            &Follower,
            &JumpData,
            Has<PendingJump>,
            &mut RealPosition,
            &mut TilePosition,
        ),
        Without<PartyLeader>,
    >,
) {
    let Ok(leader_tile) = leader.single() else {
        return;
    };
    let speed = 1.0 / STRIDE_TICKS as f32;

    for (follower, jump, pending, mut real, mut tile) in &mut followers {
        if jump.active || pending {
            continue;
        }
        let slot = trail
            .as_deref()
            .and_then(|trail| trail.slot(follower.index as usize))
            .unwrap_or(leader_tile.0)
            .as_vec2();
        let to_slot = slot - real.0;
        if to_slot == Vec2::ZERO {
            continue;
        }
        if to_slot.length() <= speed {
            real.0 = slot;
            tile.0 = real.rounded();
        } else {
            real.0 += to_slot.normalize() * speed;
        }
    }
}

/// Place sprites from grid positions and jump offsets.
pub(crate) fn sync_transforms(
    config: Res<JumpConfig>,
    tiles: Res<TileMap>,
    mut placed: Query<(&RealPosition, Option<&JumpOffset>, &mut Transform)>,
) {
    for (real, offset, mut transform) in &mut placed {
        let mut world = grid_to_world(real.0, &tiles, config.tile_size);
        if let Some(offset) = offset {
            world.x += offset.drift.x;
            world.y += offset.lift - offset.drift.y;
        }
        transform.translation.x = world.x;
        transform.translation.y = world.y;
    }
}
