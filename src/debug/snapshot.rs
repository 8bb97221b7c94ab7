//! Debug domain: serializable snapshot of the jump state.

use serde::Serialize;

use crate::core::JumpDirection;
use crate::jump::{ChargeSession, JumpData};
use crate::map::{RealPosition, TilePosition};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub cooldown_remaining: u32,
    pub executing: bool,
    pub charging: bool,
    pub charge_start_tick: u64,
    pub held_direction: JumpDirection,
    pub indicator_shown: bool,
    pub charge_level: u8,
}

impl From<&ChargeSession> for SessionSnapshot {
    fn from(session: &ChargeSession) -> Self {
        Self {
            cooldown_remaining: session.cooldown_remaining,
            executing: session.executing,
            charging: session.charging,
            charge_start_tick: session.charge_start_tick,
            held_direction: session.held_direction,
            indicator_shown: session.indicator.is_some(),
            charge_level: session.charge_level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderSnapshot {
    pub tile: [i32; 2],
    pub real: [f32; 2],
    pub jump_active: bool,
    pub progress: f32,
    pub height: f32,
    pub distance: f32,
    pub direction: JumpDirection,
    pub landing_target: Option<[i32; 2]>,
}

impl LeaderSnapshot {
    pub fn new(tile: &TilePosition, real: &RealPosition, jump: &JumpData) -> Self {
        Self {
            tile: tile.0.to_array(),
            real: real.0.to_array(),
            jump_active: jump.active,
            progress: jump.progress,
            height: jump.height,
            distance: jump.distance,
            direction: jump.direction,
            landing_target: jump.landing.map(|path| path.target.to_array()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JumpSnapshot {
    pub tick: u64,
    pub session: SessionSnapshot,
    pub leader: Option<LeaderSnapshot>,
    /// Active interaction locks, sorted
    pub locks: Vec<String>,
}

impl JumpSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
