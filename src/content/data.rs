//! Data definitions for the RON content files.
//!
//! These structs mirror the structure in assets/data/*.ron. Every field of
//! `JumpConfig` has a default, so a data file only needs to list the values
//! it overrides.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// Common wrapper for RON files with schema_version and items
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

// ============================================================================
// Jump tuning (party_jump.ron)
// ============================================================================

/// Tuning for the charged party jump. Durations are in fixed ticks.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct JumpConfig {
    /// Peak height of a fully charged jump, in pixels
    pub max_jump_height: f32,
    /// Peak height of the weakest jump (minimum charge), in pixels
    pub base_jump_height: f32,
    /// Travel of a fully charged directional jump, in pixels
    pub max_jump_distance: f32,
    /// Travel of the weakest directional jump, in pixels
    pub base_jump_distance: f32,
    /// Edge length of one map tile, in pixels
    pub tile_size: f32,
    /// Releasing before this many ticks does nothing
    pub min_charge_ticks: u32,
    /// Charge at which power stops growing
    pub max_charge_ticks: u32,
    /// Charge treated as the ultimate hold
    pub ultimate_charge_ticks: u32,
    /// Extra ticks past the ultimate charge before the jump fires by itself
    pub auto_release_grace_ticks: u32,
    /// Length of the hop animation
    pub jump_duration_ticks: u32,
    /// Ticks after landing before a new charge may start
    pub cooldown_ticks: u32,
    /// Number of discrete power levels (2-8)
    pub charge_levels: u8,
    /// Delay between consecutive followers' jumps
    pub follower_stagger_ticks: u32,
    /// Share of diagonal drift on the horizontal axis (rest goes vertical)
    pub diagonal_split: f32,
    pub show_indicator: bool,
    pub sound: SoundConfig,
    pub input: InputConfig,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            max_jump_height: 60.0,
            base_jump_height: 30.0,
            max_jump_distance: 96.0,
            base_jump_distance: 48.0,
            tile_size: 48.0,
            min_charge_ticks: 10,
            max_charge_ticks: 90,
            ultimate_charge_ticks: 120,
            auto_release_grace_ticks: 30,
            jump_duration_ticks: 30,
            cooldown_ticks: 60,
            charge_levels: 4,
            follower_stagger_ticks: 3,
            diagonal_split: 0.7,
            show_indicator: true,
            sound: SoundConfig::default(),
            input: InputConfig::default(),
        }
    }
}

impl JumpConfig {
    /// Elapsed charge at which a still-held jump fires on its own.
    pub fn auto_release_ticks(&self) -> u32 {
        self.ultimate_charge_ticks
            .saturating_add(self.auto_release_grace_ticks)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SoundConfig {
    pub enable_jump: bool,
    pub jump: CueDef,
    pub enable_charge: bool,
    pub charge: CueDef,
    pub enable_failure: bool,
    pub failure: CueDef,
    /// Seed for pitch jitter, so a replayed input sequence sounds the same
    pub jitter_seed: u64,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            enable_jump: true,
            jump: CueDef::new("Jump1", 80, 100),
            enable_charge: true,
            charge: CueDef::new("Cursor1", 40, 80),
            enable_failure: true,
            failure: CueDef::new("Buzzer1", 60, 100),
            jitter_seed: 0x5eed_0001,
        }
    }
}

/// A sound effect by name with volume (0-100) and pitch (50-150).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CueDef {
    pub name: String,
    pub volume: u8,
    pub pitch: u8,
}

impl CueDef {
    pub fn new(name: impl Into<String>, volume: u8, pitch: u8) -> Self {
        Self {
            name: name.into(),
            volume,
            pitch,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    pub enable_wasd: bool,
    pub enable_gamepad: bool,
    /// When false every jump is vertical
    pub enable_directional: bool,
    /// Stick deflection that counts as a held direction
    pub stick_threshold: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            enable_wasd: true,
            enable_gamepad: true,
            enable_directional: true,
            stick_threshold: 0.5,
        }
    }
}

// ============================================================================
// Demo stages (stages.ron)
// ============================================================================

/// A small tile map. Rows are read top to bottom; `#` is a wall, `=` a
/// fence that can only be crossed sideways, every other character is open
/// floor.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StageDef {
    pub id: String,
    pub name: String,
    pub rows: Vec<String>,
    pub party_start: (i32, i32),
    pub followers: u32,
    #[serde(default)]
    pub obstacles: Vec<ObstacleDef>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObstacleDef {
    pub label: String,
    pub x: i32,
    pub y: i32,
    /// Same-priority obstacles block landings; decorations do not
    pub blocking: bool,
}
