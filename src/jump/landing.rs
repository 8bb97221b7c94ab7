//! Jump domain: landing tile projection and validation.

use bevy::prelude::*;
use thiserror::Error;

use crate::content::JumpConfig;
use crate::core::JumpDirection;
use crate::jump::power::JumpPower;
use crate::map::MapQuery;

/// Why a landing tile was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LandingRejection {
    #[error("landing tile {target} is outside the map")]
    OutOfBounds { target: IVec2 },
    #[error("cannot jump {direction:?} from {origin} onto {target}")]
    Impassable {
        origin: IVec2,
        target: IVec2,
        direction: JumpDirection,
    },
    #[error("landing tile {target} is occupied by {blocker}")]
    Occupied { target: IVec2, blocker: Entity },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingVerdict {
    /// Jump in place; always allowed
    Vertical,
    Clear { target: IVec2 },
    Rejected(LandingRejection),
}

impl LandingVerdict {
    pub fn is_valid(&self) -> bool {
        !matches!(self, LandingVerdict::Rejected(_))
    }

    pub fn target(&self) -> Option<IVec2> {
        match self {
            LandingVerdict::Clear { target } => Some(*target),
            _ => None,
        }
    }
}

/// Judges landings against a map. Holds no state of its own, so the same
/// inputs on an unchanged map always give the same verdict.
pub struct LandingValidator<'a, M: MapQuery> {
    map: &'a M,
    config: &'a JumpConfig,
}

impl<'a, M: MapQuery> LandingValidator<'a, M> {
    pub fn new(map: &'a M, config: &'a JumpConfig) -> Self {
        Self { map, config }
    }

    pub fn validate(&self, origin: IVec2, direction: JumpDirection, elapsed: u32) -> LandingVerdict {
        let power = JumpPower::from_elapsed(elapsed, self.config);
        self.validate_power(origin, direction, &power)
    }

    pub fn validate_power(
        &self,
        origin: IVec2,
        direction: JumpDirection,
        power: &JumpPower,
    ) -> LandingVerdict {
        if direction.is_none() {
            return LandingVerdict::Vertical;
        }

        let offset = power.landing_offset(direction, self.config.tile_size);
        if offset == IVec2::ZERO {
            return LandingVerdict::Vertical;
        }
        let target = origin + offset;

        if !self.map.in_bounds(target) {
            return LandingVerdict::Rejected(LandingRejection::OutOfBounds { target });
        }

        if !self.map.is_passable(origin, direction)
            || !self.map.is_passable(target, direction.reverse())
        {
            return LandingVerdict::Rejected(LandingRejection::Impassable {
                origin,
                target,
                direction,
            });
        }

        if let Some(blocker) = self
            .map
            .occupants_at(target)
            .into_iter()
            .find(|occupant| occupant.blocking)
        {
            return LandingVerdict::Rejected(LandingRejection::Occupied {
                target,
                blocker: blocker.entity,
            });
        }

        LandingVerdict::Clear { target }
    }
}
