//! Debug/dev tooling for the party jump (built with the `dev-tools` feature).
//!
//! Features:
//! - F1 toggles an on-screen readout of the charge session
//! - F3 logs a JSON snapshot of the session and the leader's jump
//! - F4 toggles the `message` interaction lock to try blocked charging
//! - F5 requests a scripted jump in the held direction
//! - F6 clears the jump cooldown

mod snapshot;


pub use snapshot::{JumpSnapshot, LeaderSnapshot, SessionSnapshot};

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::core::{InteractionLocks, LOCK_MESSAGE, TickClock};
use crate::input::JumpInput;
use crate::jump::{
    ChargeSession, JumpCancelled, JumpCommitted, JumpData, JumpRequest, PartyLeader,
    SetJumpCooldown,
};
use crate::map::{RealPosition, TilePosition};

// ============================================================================
// Debug State Resource
// ============================================================================

/// Resource tracking debug tooling state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Whether the session readout is visible
    pub show_info: bool,
    /// Message shown in the readout until its timer runs out
    pub status_message: Option<(String, f32)>,
}

impl DebugState {
    /// Set a status message that will fade after a duration
    pub fn set_message(&mut self, message: impl Into<String>, duration: f32) {
        self.status_message = Some((message.into(), duration));
    }
}

/// Marker for the session readout text
#[derive(Component, Debug)]
pub struct DebugInfoOverlay;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(
                Update,
                (
                    handle_debug_hotkeys,
                    log_jump_outcomes,
                    update_status_message,
                )
                    .chain(),
            )
            .add_systems(Update, update_debug_info_overlay);
    }
}

// ============================================================================
// Systems
// ============================================================================

/// Capture the current jump state.
pub fn capture_snapshot(
    clock: &TickClock,
    session: &ChargeSession,
    leader: Option<(&TilePosition, &RealPosition, &JumpData)>,
    locks: &InteractionLocks,
) -> JumpSnapshot {
    let mut lock_names: Vec<String> = locks.sources.iter().cloned().collect();
    lock_names.sort();
    JumpSnapshot {
        tick: clock.now(),
        session: SessionSnapshot::from(session),
        leader: leader.map(|(tile, real, jump)| LeaderSnapshot::new(tile, real, jump)),
        locks: lock_names,
    }
}

fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    clock: Res<TickClock>,
    session: Res<ChargeSession>,
    mut locks: ResMut<InteractionLocks>,
    mut debug_state: ResMut<DebugState>,
    input: Res<JumpInput>,
    mut requests: MessageWriter<JumpRequest>,
    mut cooldowns: MessageWriter<SetJumpCooldown>,
    leader: Query<(&TilePosition, &RealPosition, &JumpData), With<PartyLeader>>,
) {
    if keyboard.just_pressed(KeyCode::F1) {
        debug_state.show_info = !debug_state.show_info;
    }

    if keyboard.just_pressed(KeyCode::F3) {
        let snapshot = capture_snapshot(&clock, &session, leader.single().ok(), &locks);
        match snapshot.to_json() {
            Ok(json) => info!("Jump snapshot:\n{}", json),
            Err(e) => warn!("Failed to serialize jump snapshot: {}", e),
        }
        debug_state.set_message("Snapshot logged", 2.0);
    }

    if keyboard.just_pressed(KeyCode::F4) {
        let locked = locks.toggle(LOCK_MESSAGE);
        info!("Message lock {}", if locked { "on" } else { "off" });
        debug_state.set_message(
            if locked {
                "Message lock ON"
            } else {
                "Message lock OFF"
            },
            2.0,
        );
    }

    if keyboard.just_pressed(KeyCode::F5) {
        requests.write(JumpRequest {
            direction: input.direction,
        });
        debug_state.set_message(format!("Jump requested {:?}", input.direction), 1.5);
    }

    if keyboard.just_pressed(KeyCode::F6) {
        cooldowns.write(SetJumpCooldown { ticks: 0 });
        debug_state.set_message("Cooldown cleared", 1.5);
    }
}

fn log_jump_outcomes(
    mut committed: MessageReader<JumpCommitted>,
    mut cancelled: MessageReader<JumpCancelled>,
    mut debug_state: ResMut<DebugState>,
) {
    for jump in committed.read() {
        info!(
            "Jump {:?} from {} (height {:.0}, distance {:.0}, {} followers)",
            jump.direction, jump.origin, jump.height, jump.distance, jump.followers
        );
    }
    for cancel in cancelled.read() {
        info!("Jump refused: {}", cancel.reason);
        debug_state.set_message(cancel.reason.to_string(), 1.5);
    }
}

/// Update status message timer and fade out
fn update_status_message(time: Res<Time>, mut debug_state: ResMut<DebugState>) {
    if let Some((_, ref mut duration)) = debug_state.status_message {
        *duration -= time.delta_secs();
        if *duration <= 0.0 {
            debug_state.status_message = None;
        }
    }
}

/// Update the session readout with the current charge state
fn update_debug_info_overlay(
    mut commands: Commands,
    debug_state: Res<DebugState>,
    clock: Res<TickClock>,
    session: Res<ChargeSession>,
    locks: Res<InteractionLocks>,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    if !debug_state.show_info {
        // Cleanup overlay if it exists
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
        return;
    }

    // Ensure overlay exists
    if existing_overlay.is_empty() {
        spawn_debug_info_overlay(&mut commands);
        return;
    }

    if let Ok(mut text) = overlay_query.single_mut() {
        let status = debug_state
            .status_message
            .as_ref()
            .map(|(message, _)| message.as_str())
            .unwrap_or("");
        **text = format!(
            "Tick: {}\nCharging: {} (since {})\nDirection: {:?}\nExecuting: {}\nCooldown: {}\nLocked: {}\n{}",
            clock.now(),
            session.charging,
            session.charge_start_tick,
            session.held_direction,
            session.executing,
            session.cooldown_remaining,
            locks.is_locked(),
            status
        );
    }
}

fn spawn_debug_info_overlay(commands: &mut Commands) {
    commands.spawn((
        DebugInfoOverlay,
        Text::new("Loading..."),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.9, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            bottom: Val::Px(20.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ZIndex(500),
    ));
}
