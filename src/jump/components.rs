//! Jump domain: party markers and the charge indicator components.

use bevy::prelude::*;
use serde::Serialize;

use crate::core::JumpDirection;

/// The party member whose tile drives landing validation.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PartyLeader;

/// A trailing party member. Index 0 walks directly behind the leader.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Follower {
    pub index: u32,
}

/// The on-screen charge indicator spawned while charging.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ChargeIndicator;

/// What the indicator should show this tick.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct IndicatorReading {
    pub progress: f32,
    pub direction: JumpDirection,
    pub valid: bool,
    pub power_level: u8,
    pub full_charge: bool,
}
