//! Core domain: fixed tick clock, grid headings, lifecycle messages, and
//! interaction locks.

mod clock;
mod direction;
mod events;
mod resources;


pub use clock::{TICKS_PER_SECOND, TickClock};
pub use direction::JumpDirection;
pub use events::{MapChangedEvent, SaveLoadedEvent};
pub use resources::{InteractionLocks, LOCK_EVENT, LOCK_MENU_DISABLED, LOCK_MESSAGE, LOCK_WALKING};

use bevy::prelude::*;

use crate::core::clock::advance_clock;

/// Ordered stages of one fixed tick. Everything the mechanic mutates is
/// written inside these sets, before `Update` rendering reads it.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSet {
    Clock,
    Lifecycle,
    Input,
    Motion,
    Charge,
    Publish,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(TICKS_PER_SECOND))
            .init_resource::<TickClock>()
            .init_resource::<InteractionLocks>()
            .add_message::<MapChangedEvent>()
            .add_message::<SaveLoadedEvent>()
            .configure_sets(
                FixedUpdate,
                (
                    TickSet::Clock,
                    TickSet::Lifecycle,
                    TickSet::Input,
                    TickSet::Motion,
                    TickSet::Charge,
                    TickSet::Publish,
                )
                    .chain(),
            )
            .add_systems(FixedUpdate, advance_clock.in_set(TickSet::Clock));
    }
}
