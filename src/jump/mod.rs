//! Jump domain: charge, landing validation and the staggered party hop.
//!
//! Per fixed tick, after input is sampled:
//! `promote_pending_jumps → advance_jump_motion → update_charge_session →
//! publish_jump_offsets`, with `reset_on_lifecycle` ahead of all of them.

mod components;
mod cues;
mod events;
mod landing;
mod motion;
mod power;
mod session;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{ChargeIndicator, Follower, IndicatorReading, PartyLeader};
pub use cues::{charge_level_cue, failure_cue, jump_cue};
pub use events::{JumpCancelled, JumpCommitted, JumpRequest, SetJumpCooldown};
pub use landing::{LandingRejection, LandingValidator, LandingVerdict};
pub use motion::{
    JumpData, JumpFrame, JumpOffset, LandingPath, PendingJump, drift_vector, follower_start_tick,
    jump_easing,
};
pub use power::{JumpPower, charge_progress, power_level};
pub use session::{
    ChargeContext, ChargeFeedback, ChargeOutcome, ChargeSession, IndicatorHandle, JumpLaunch,
    LeaderState,
};
pub use systems::EcsFeedback;

use bevy::prelude::*;

use crate::core::TickSet;
pub(crate) use crate::jump::systems::advance_jump_motion;
use crate::jump::systems::{
    promote_pending_jumps, publish_jump_offsets, reset_on_lifecycle, update_charge_session,
};

pub struct JumpPlugin;

impl Plugin for JumpPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ChargeSession>()
            .add_message::<JumpCommitted>()
            .add_message::<JumpCancelled>()
            .add_message::<JumpRequest>()
            .add_message::<SetJumpCooldown>()
            .add_systems(
                FixedUpdate,
                (
                    reset_on_lifecycle.in_set(TickSet::Lifecycle),
                    (promote_pending_jumps, advance_jump_motion)
                        .chain()
                        .in_set(TickSet::Motion),
                    update_charge_session.in_set(TickSet::Charge),
                    publish_jump_offsets.in_set(TickSet::Publish),
                ),
            );
    }
}
