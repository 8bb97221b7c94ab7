//! Jump domain: messages describing how a charge ended, and the
//! scripted controls other domains may send.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::core::JumpDirection;
use crate::jump::landing::LandingRejection;

/// A jump was validated and the party is now airborne.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpCommitted {
    pub origin: IVec2,
    pub target: Option<IVec2>,
    pub direction: JumpDirection,
    pub height: f32,
    pub distance: f32,
    pub followers: u32,
}

impl Message for JumpCommitted {}

/// A charged release was refused by the landing validator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpCancelled {
    pub reason: LandingRejection,
}

impl Message for JumpCancelled {}

/// Jump right away in `direction` without charging, as a cutscene or
/// trigger would. Ignored unless the party could start a charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JumpRequest {
    pub direction: JumpDirection,
}

impl Message for JumpRequest {}

/// Overwrite the remaining jump cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetJumpCooldown {
    pub ticks: u32,
}

impl Message for SetJumpCooldown {}
