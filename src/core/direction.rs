//! Core domain: eight-way grid heading shared by input, map and jump code.
//!
//! Grid coordinates grow east on x and south on y, matching the row order
//! of the stage files.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum JumpDirection {
    /// Jump in place
    #[default]
    None,
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl JumpDirection {
    pub const ALL: [JumpDirection; 8] = [
        JumpDirection::North,
        JumpDirection::South,
        JumpDirection::East,
        JumpDirection::West,
        JumpDirection::NorthEast,
        JumpDirection::NorthWest,
        JumpDirection::SouthEast,
        JumpDirection::SouthWest,
    ];

    /// Heading for a pair of axis signs; only the sign of each value matters.
    pub fn from_axes(dx: i32, dy: i32) -> Self {
        match (dx.signum(), dy.signum()) {
            (0, -1) => JumpDirection::North,
            (0, 1) => JumpDirection::South,
            (1, 0) => JumpDirection::East,
            (-1, 0) => JumpDirection::West,
            (1, -1) => JumpDirection::NorthEast,
            (-1, -1) => JumpDirection::NorthWest,
            (1, 1) => JumpDirection::SouthEast,
            (-1, 1) => JumpDirection::SouthWest,
            _ => JumpDirection::None,
        }
    }

    pub fn is_none(self) -> bool {
        self == JumpDirection::None
    }

    pub fn is_diagonal(self) -> bool {
        let delta = self.delta();
        delta.x != 0 && delta.y != 0
    }

    /// One-tile step in grid coordinates.
    pub fn delta(self) -> IVec2 {
        match self {
            JumpDirection::None => IVec2::ZERO,
            JumpDirection::North => IVec2::new(0, -1),
            JumpDirection::South => IVec2::new(0, 1),
            JumpDirection::East => IVec2::new(1, 0),
            JumpDirection::West => IVec2::new(-1, 0),
            JumpDirection::NorthEast => IVec2::new(1, -1),
            JumpDirection::NorthWest => IVec2::new(-1, -1),
            JumpDirection::SouthEast => IVec2::new(1, 1),
            JumpDirection::SouthWest => IVec2::new(-1, 1),
        }
    }

    /// Normalized heading in grid coordinates, zero for `None`.
    pub fn unit_vector(self) -> Vec2 {
        self.delta().as_vec2().normalize_or_zero()
    }

    pub fn reverse(self) -> Self {
        let delta = self.delta();
        JumpDirection::from_axes(-delta.x, -delta.y)
    }

    /// Horizontal and vertical components, each `None` when absent.
    pub fn split(self) -> (JumpDirection, JumpDirection) {
        let delta = self.delta();
        (
            JumpDirection::from_axes(delta.x, 0),
            JumpDirection::from_axes(0, delta.y),
        )
    }

    /// Angle of the heading on screen (y up), zero pointing east.
    pub fn screen_angle(self) -> f32 {
        match self {
            JumpDirection::None | JumpDirection::East => 0.0,
            JumpDirection::NorthEast => FRAC_PI_4,
            JumpDirection::North => FRAC_PI_2,
            JumpDirection::NorthWest => 3.0 * FRAC_PI_4,
            JumpDirection::West => PI,
            JumpDirection::SouthWest => -3.0 * FRAC_PI_4,
            JumpDirection::South => -FRAC_PI_2,
            JumpDirection::SouthEast => -FRAC_PI_4,
        }
    }
}
