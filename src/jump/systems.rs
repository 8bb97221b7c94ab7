//! Jump domain: fixed-tick systems wiring the charge session into the ECS.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::audio::{CueRequest, PlayCue};
use crate::content::JumpConfig;
use crate::core::{InteractionLocks, MapChangedEvent, SaveLoadedEvent, TickClock};
use crate::input::JumpInput;
use crate::jump::components::{ChargeIndicator, Follower, IndicatorReading, PartyLeader};
use crate::jump::events::{JumpCancelled, JumpCommitted, JumpRequest, SetJumpCooldown};
use crate::jump::motion::{JumpData, JumpOffset, LandingPath, PendingJump, follower_start_tick};
use crate::jump::session::{
    ChargeContext, ChargeFeedback, ChargeOutcome, ChargeSession, IndicatorHandle, JumpLaunch,
    LeaderState,
};
use crate::map::{MapView, Obstacle, Occupant, RealPosition, TileMap, TilePosition};

/// `ChargeFeedback` backed by commands and the cue channel.
pub struct EcsFeedback<'a, 'w, 's, 'm> {
    pub commands: &'a mut Commands<'w, 's>,
    pub cues: &'a mut MessageWriter<'m, PlayCue>,
}

impl ChargeFeedback for EcsFeedback<'_, '_, '_, '_> {
    fn show_indicator(&mut self) -> IndicatorHandle {
        let entity = self
            .commands
            .spawn((
                Name::new("ChargeIndicator"),
                ChargeIndicator,
                IndicatorReading::default(),
            ))
            .id();
        IndicatorHandle(entity)
    }

    fn update_indicator(&mut self, handle: IndicatorHandle, reading: IndicatorReading) {
        self.commands.entity(handle.0).try_insert(reading);
    }

    fn hide_indicator(&mut self, handle: IndicatorHandle) {
        self.commands.entity(handle.0).try_despawn();
    }

    fn play_cue(&mut self, cue: CueRequest, jitter: bool) {
        self.cues.write(PlayCue { cue, jitter });
    }
}

/// Map change or load: zero the session and drop every jump in flight.
pub(crate) fn reset_on_lifecycle(
    mut commands: Commands,
    mut map_changed: MessageReader<MapChangedEvent>,
    mut save_loaded: MessageReader<SaveLoadedEvent>,
    mut session: ResMut<ChargeSession>,
    mut cues: MessageWriter<PlayCue>,
    mut jumpers: Query<(
        &mut JumpData,
        &mut JumpOffset,
        Option<&mut RealPosition>,
        Option<&TilePosition>,
    )>,
    pending: Query<Entity, With<PendingJump>>,
    indicators: Query<Entity, With<ChargeIndicator>>,
) {
    let changed = map_changed.read().count();
    let loaded = save_loaded.read().count();
    if changed + loaded == 0 {
        return;
    }

    let mut feedback = EcsFeedback {
        commands: &mut commands,
        cues: &mut cues,
    };
    session.reset(&mut feedback);

    for (mut data, mut offset, real, tile) in &mut jumpers {
        if let (true, Some(mut real), Some(tile)) = (data.active, real, tile) {
            real.0 = tile.0.as_vec2();
        }
        data.clear();
        *offset = JumpOffset::default();
    }
    for entity in &pending {
        commands.entity(entity).remove::<PendingJump>();
    }
    for entity in &indicators {
        commands.entity(entity).try_despawn();
    }

    info!("Jump session reset (map changes: {changed}, loads: {loaded})");
}

/// Followers whose stagger has elapsed take off.
pub(crate) fn promote_pending_jumps(
    mut commands: Commands,
    clock: Res<TickClock>,
    mut followers: Query<(Entity, &PendingJump, &mut JumpData)>,
) {
    let now = clock.now();
    for (entity, pending, mut data) in &mut followers {
        if pending.is_due(now) {
            *data = pending.into_jump();
            commands.entity(entity).remove::<PendingJump>();
        }
    }
}

/// Advance every active hop; land the ones that finished.
pub(crate) fn advance_jump_motion(
    clock: Res<TickClock>,
    config: Res<JumpConfig>,
    mut jumpers: Query<(
        &mut JumpData,
        Option<&mut RealPosition>,
        Option<&mut TilePosition>,
    )>,
) {
    let now = clock.now();
    for (mut data, mut real, mut tile) in &mut jumpers {
        let Some(frame) = data.advance(now, config.jump_duration_ticks) else {
            continue;
        };

        // Followers have no landing path: their hop is drawn through
        // `JumpOffset` only and they never leave their tile.
        if let Some(path) = data.landing {
            let position = path.position_at(frame.eased);
            if let Some(real) = real.as_deref_mut() {
                real.0 = position;
            }
            if let Some(tile) = tile.as_deref_mut() {
                tile.0 = position.round().as_ivec2();
            }
        }

        if frame.landed {
            if let Some(path) = data.landing {
                if let Some(real) = real.as_deref_mut() {
                    real.0 = path.target.as_vec2();
                }
                if let Some(tile) = tile.as_deref_mut() {
                    tile.0 = path.target;
                }
            }
            data.clear();
        }
    }
}

pub(crate) fn update_charge_session(
    mut commands: Commands,
    clock: Res<TickClock>,
    input: Res<JumpInput>,
    locks: Res<InteractionLocks>,
    config: Res<JumpConfig>,
    tiles: Res<TileMap>,
    mut session: ResMut<ChargeSession>,
    mut cues: MessageWriter<PlayCue>,
    mut committed: MessageWriter<JumpCommitted>,
    mut cancelled: MessageWriter<JumpCancelled>,
    mut requests: MessageReader<JumpRequest>,
    mut cooldowns: MessageReader<SetJumpCooldown>,
    mut leader: Query<(&TilePosition, &mut JumpData), With<PartyLeader>>,
    followers: Query<(Entity, &Follower, &Visibility), Without<PartyLeader>>,
    obstacles: Query<(Entity, &TilePosition, &Obstacle), Without<PartyLeader>>,
) {
    let now = clock.now();
    let requested = requests.read().last().map(|request| request.direction);

    let mut leader = leader.single_mut().ok();
    let leader_state = leader.as_ref().map(|(tile, data)| LeaderState {
        tile: tile.0,
        airborne: data.active,
    });

    let map = MapView::new(
        &tiles,
        obstacles.iter().map(|(entity, tile, obstacle)| {
            (
                tile.0,
                Occupant {
                    entity,
                    blocking: obstacle.blocking,
                },
            )
        }),
    );
    let ctx = ChargeContext {
        now,
        input: *input,
        locked: locks.is_locked(),
        leader: leader_state,
        config: &config,
    };

    let outcome = {
        let mut feedback = EcsFeedback {
            commands: &mut commands,
            cues: &mut cues,
        };
        match session.tick(&ctx, &map, &mut feedback) {
            ChargeOutcome::Idle => match requested {
                Some(direction) => session.request_jump(&ctx, direction, &map, &mut feedback),
                None => ChargeOutcome::Idle,
            },
            outcome => outcome,
        }
    };
    for change in cooldowns.read() {
        session.set_cooldown(change.ticks);
    }

    match outcome {
        ChargeOutcome::Launched(launch) => {
            if let Some((_, data)) = leader.as_mut() {
                **data = leader_jump(&launch, now);
            }
            let order = visible_followers(&followers);
            for (index, entity) in order.iter().enumerate() {
                commands.entity(*entity).try_insert(PendingJump {
                    start_tick: follower_start_tick(now, index, config.follower_stagger_ticks),
                    direction: launch.direction,
                    height: launch.height(),
                    distance: launch.distance(),
                });
            }
            committed.write(JumpCommitted {
                origin: launch.origin,
                target: launch.target,
                direction: launch.direction,
                height: launch.height(),
                distance: launch.distance(),
                followers: order.len() as u32,
            });
        }
        ChargeOutcome::Cancelled(reason) => {
            cancelled.write(JumpCancelled { reason });
        }
        _ => {}
    }
}

/// Recompute render offsets from the current jump state.
pub(crate) fn publish_jump_offsets(
    config: Res<JumpConfig>,
    mut jumpers: Query<(&JumpData, &mut JumpOffset)>,
) {
    for (data, mut offset) in &mut jumpers {
        let next = data.offset(config.diagonal_split);
        if *offset != next {
            *offset = next;
        }
    }
}

fn leader_jump(launch: &JumpLaunch, now: u64) -> JumpData {
    let landing = launch.target.map(|target| LandingPath {
        origin: launch.origin,
        target,
    });
    JumpData::begin(
        now,
        launch.direction,
        launch.height(),
        launch.distance(),
        landing,
    )
}

/// Visible followers in formation order.
fn visible_followers(
    followers: &Query<(Entity, &Follower, &Visibility), Without<PartyLeader>>,
) -> Vec<Entity> {
    let mut visible: Vec<(u32, Entity)> = followers
        .iter()
        .filter(|(_, _, visibility)| **visibility != Visibility::Hidden)
        .map(|(entity, follower, _)| (follower.index, entity))
        .collect();
    visible.sort_by_key(|(index, _)| *index);
    visible.into_iter().map(|(_, entity)| entity).collect()
}
