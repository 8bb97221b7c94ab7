//! Jump domain: charge power shared by landing validation and commit.

use bevy::prelude::*;
use serde::Serialize;

use crate::content::JumpConfig;
use crate::core::JumpDirection;

/// Power of a jump released after `elapsed` charge ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JumpPower {
    /// Charge progress in [0, 1] between the minimum and full charge
    pub progress: f32,
    /// 0.5 at minimum charge up to 2.0 at full charge
    pub multiplier: f32,
    /// Discrete bucket of `progress`, 0..charge_levels
    pub level: u8,
    pub height: f32,
    /// Horizontal travel in pixels for a directional jump
    pub distance: f32,
}

impl JumpPower {
    pub fn from_elapsed(elapsed: u32, config: &JumpConfig) -> Self {
        let progress = charge_progress(elapsed, config);
        let multiplier = 0.5 + progress * 1.5;
        // Map the multiplier range back onto base..max.
        let scale = (multiplier - 0.5) / 1.5;
        Self {
            progress,
            multiplier,
            level: power_level(progress, config.charge_levels),
            height: lerp(config.base_jump_height, config.max_jump_height, scale),
            distance: lerp(config.base_jump_distance, config.max_jump_distance, scale),
        }
    }

    pub fn is_full(&self) -> bool {
        self.progress >= 1.0
    }

    /// Whole tiles covered by a directional jump.
    pub fn tiles(&self, tile_size: f32) -> i32 {
        if tile_size <= 0.0 {
            return 0;
        }
        (self.distance / tile_size).round() as i32
    }

    /// Grid offset from origin to landing tile.
    pub fn landing_offset(&self, direction: JumpDirection, tile_size: f32) -> IVec2 {
        if direction.is_none() {
            return IVec2::ZERO;
        }
        (direction.unit_vector() * self.tiles(tile_size) as f32)
            .round()
            .as_ivec2()
    }

    /// Travel actually committed for `direction`; vertical jumps stay put.
    pub fn distance_for(&self, direction: JumpDirection) -> f32 {
        if direction.is_none() { 0.0 } else { self.distance }
    }
}

/// `(elapsed - min) / (max - min)`, clamped to [0, 1].
pub fn charge_progress(elapsed: u32, config: &JumpConfig) -> f32 {
    let span = config
        .max_charge_ticks
        .saturating_sub(config.min_charge_ticks)
        .max(1);
    let charged = elapsed.saturating_sub(config.min_charge_ticks);
    (charged as f32 / span as f32).clamp(0.0, 1.0)
}

/// `min(floor(progress * levels), levels - 1)`.
pub fn power_level(progress: f32, levels: u8) -> u8 {
    let levels = levels.max(1);
    let bucket = (progress.clamp(0.0, 1.0) * levels as f32).floor() as u8;
    bucket.min(levels - 1)
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}
