//! Jump domain: eased hop motion for the leader and staggered followers.

use bevy::prelude::*;
use std::f32::consts::PI;

use crate::core::JumpDirection;

/// Origin and landing tile of an entity that relocates logically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandingPath {
    pub origin: IVec2,
    pub target: IVec2,
}

impl LandingPath {
    /// Continuous position (tile units) at eased progress `eased`.
    pub fn position_at(&self, eased: f32) -> Vec2 {
        let origin = self.origin.as_vec2();
        origin + (self.target.as_vec2() - origin) * eased
    }
}

/// Per-entity hop state. Inactive (all zero) between jumps.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct JumpData {
    pub active: bool,
    pub progress: f32,
    pub start_tick: u64,
    pub height: f32,
    pub distance: f32,
    pub direction: JumpDirection,
    /// Present only on the leader of a directional jump
    pub landing: Option<LandingPath>,
}

/// Where an active jump is this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpFrame {
    pub progress: f32,
    pub eased: f32,
    pub landed: bool,
}

impl JumpData {
    pub fn begin(
        start_tick: u64,
        direction: JumpDirection,
        height: f32,
        distance: f32,
        landing: Option<LandingPath>,
    ) -> Self {
        Self {
            active: true,
            progress: 0.0,
            start_tick,
            height,
            distance,
            direction,
            landing,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Move progress to `now`. Returns `None` when no jump is active.
    pub fn advance(&mut self, now: u64, duration_ticks: u32) -> Option<JumpFrame> {
        if !self.active {
            return None;
        }
        let elapsed = now.saturating_sub(self.start_tick) as f32;
        let progress = (elapsed / duration_ticks.max(1) as f32).min(1.0);
        self.progress = progress;
        Some(JumpFrame {
            progress,
            eased: jump_easing(progress),
            landed: progress >= 1.0,
        })
    }

    /// Render offset for the current progress. Entities with a landing path
    /// move through their real position instead, so they never drift.
    pub fn offset(&self, diagonal_split: f32) -> JumpOffset {
        if !self.active {
            return JumpOffset::default();
        }
        let eased = jump_easing(self.progress);
        let drift = if self.landing.is_some() {
            Vec2::ZERO
        } else {
            drift_vector(self.direction, self.distance * eased, diagonal_split)
        };
        JumpOffset {
            lift: self.height * (eased * PI).sin(),
            drift,
        }
    }
}

/// A follower's jump waiting for its staggered start.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PendingJump {
    pub start_tick: u64,
    pub direction: JumpDirection,
    pub height: f32,
    pub distance: f32,
}

impl PendingJump {
    pub fn is_due(&self, now: u64) -> bool {
        now >= self.start_tick
    }

    pub fn into_jump(self) -> JumpData {
        JumpData::begin(
            self.start_tick,
            self.direction,
            self.height,
            self.distance,
            None,
        )
    }
}

/// Pixels to draw an entity away from its position this tick.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct JumpOffset {
    /// Height above the ground
    pub lift: f32,
    /// Horizontal travel in grid axes (y grows south)
    pub drift: Vec2,
}

/// Quartic ease-out over the first half, ease-in over the second.
/// Fast takeoff, hang at the apex, fast landing.
pub fn jump_easing(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        0.5 * (1.0 - (1.0 - 2.0 * t).powi(4))
    } else {
        0.5 + 0.5 * (2.0 * t - 1.0).powi(4)
    }
}

/// `amount` pixels of travel along `direction`. Diagonals put `split` of it
/// on the x axis and the rest on y.
pub fn drift_vector(direction: JumpDirection, amount: f32, split: f32) -> Vec2 {
    let delta = direction.delta().as_vec2();
    if direction.is_diagonal() {
        Vec2::new(delta.x * amount * split, delta.y * amount * (1.0 - split))
    } else {
        delta * amount
    }
}

/// Tick at which the follower at formation `index` takes off.
pub fn follower_start_tick(now: u64, index: usize, stagger_ticks: u32) -> u64 {
    now + (index as u64 + 1) * stagger_ticks as u64
}
