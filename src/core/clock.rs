//! Core domain: monotonic tick counter driving every timed jump state.

use bevy::prelude::*;

/// Fixed simulation rate. Charge, cooldown, stagger and animation lengths
/// in the configuration are expressed in ticks at this rate.
pub const TICKS_PER_SECOND: f64 = 60.0;

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickClock {
    tick: u64,
}

impl TickClock {
    pub fn starting_at(tick: u64) -> Self {
        Self { tick }
    }

    /// Current tick; never decreases.
    pub fn now(&self) -> u64 {
        self.tick
    }

    pub fn advance(&mut self) {
        self.tick = self.tick.saturating_add(1);
    }

    /// Ticks elapsed since `earlier`, zero if `earlier` lies in the future.
    pub fn since(&self, earlier: u64) -> u64 {
        self.tick.saturating_sub(earlier)
    }
}

pub(crate) fn advance_clock(mut clock: ResMut<TickClock>) {
    clock.advance();
}
