//! Validation of jump tuning invariants.

use super::data::{CueDef, JumpConfig};
use super::error::ConfigError;

/// Helper macro for recording a violated invariant
macro_rules! check {
    ($errors:expr, $cond:expr, $field:expr, $($reason:tt)+) => {
        if !$cond {
            $errors.push(ConfigError::Invalid {
                field: $field,
                reason: format!($($reason)+),
            });
        }
    };
}

/// Validate all invariants of a jump configuration.
/// Returns a list of errors, empty if the configuration is usable.
pub fn validate_config(config: &JumpConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    check!(
        errors,
        config.min_charge_ticks < config.max_charge_ticks,
        "min_charge_ticks",
        "must be below max_charge_ticks ({} >= {})",
        config.min_charge_ticks,
        config.max_charge_ticks
    );
    check!(
        errors,
        config.max_charge_ticks <= config.ultimate_charge_ticks,
        "ultimate_charge_ticks",
        "must not be below max_charge_ticks ({} < {})",
        config.ultimate_charge_ticks,
        config.max_charge_ticks
    );
    check!(
        errors,
        (2..=8).contains(&config.charge_levels),
        "charge_levels",
        "must be between 2 and 8, got {}",
        config.charge_levels
    );
    check!(
        errors,
        config.jump_duration_ticks > 0,
        "jump_duration_ticks",
        "must be positive"
    );
    check!(
        errors,
        config.follower_stagger_ticks > 0,
        "follower_stagger_ticks",
        "must be positive"
    );
    check!(
        errors,
        config.base_jump_height > 0.0 && config.base_jump_height <= config.max_jump_height,
        "base_jump_height",
        "must be in (0, max_jump_height], got {}",
        config.base_jump_height
    );
    check!(
        errors,
        config.base_jump_distance > 0.0 && config.base_jump_distance <= config.max_jump_distance,
        "base_jump_distance",
        "must be in (0, max_jump_distance], got {}",
        config.base_jump_distance
    );
    check!(
        errors,
        config.tile_size > 0.0,
        "tile_size",
        "must be positive, got {}",
        config.tile_size
    );
    check!(
        errors,
        (0.0..=1.0).contains(&config.diagonal_split),
        "diagonal_split",
        "must be within [0, 1], got {}",
        config.diagonal_split
    );
    check!(
        errors,
        config.input.stick_threshold > 0.0 && config.input.stick_threshold < 1.0,
        "input.stick_threshold",
        "must be within (0, 1), got {}",
        config.input.stick_threshold
    );

    check_cue(&mut errors, &config.sound.jump, "sound.jump");
    check_cue(&mut errors, &config.sound.charge, "sound.charge");
    check_cue(&mut errors, &config.sound.failure, "sound.failure");

    errors
}

fn check_cue(errors: &mut Vec<ConfigError>, cue: &CueDef, field: &'static str) {
    check!(
        errors,
        cue.volume <= 100,
        field,
        "volume must be 0-100, got {}",
        cue.volume
    );
    check!(
        errors,
        (50..=150).contains(&cue.pitch),
        field,
        "pitch must be 50-150, got {}",
        cue.pitch
    );
}
