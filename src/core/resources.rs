//! Core domain: shared resources gating player-initiated actions.

use bevy::prelude::*;
use std::collections::HashSet;

/// A message window is open.
pub const LOCK_MESSAGE: &str = "message";
/// The host disabled the menu (usually during scripted scenes).
pub const LOCK_MENU_DISABLED: &str = "menu_disabled";
/// A map event or cutscene is running.
pub const LOCK_EVENT: &str = "event";
/// The leader is mid-step on a regular walk.
pub const LOCK_WALKING: &str = "walking";

/// Resource tracking why the party may not start a charge right now.
/// Charging is blocked if any source is active.
#[derive(Resource, Debug, Default)]
pub struct InteractionLocks {
    pub sources: HashSet<String>,
}

impl InteractionLocks {
    pub fn is_locked(&self) -> bool {
        !self.sources.is_empty()
    }

    pub fn lock(&mut self, source: impl Into<String>) {
        self.sources.insert(source.into());
    }

    pub fn unlock(&mut self, source: impl Into<String>) {
        self.sources.remove(&source.into());
    }

    /// Lock or unlock `source` depending on `active`.
    pub fn set(&mut self, source: impl Into<String>, active: bool) {
        if active {
            self.lock(source);
        } else {
            self.unlock(source);
        }
    }

    pub fn toggle(&mut self, source: impl Into<String>) -> bool {
        let source = source.into();
        if self.sources.remove(&source) {
            false
        } else {
            self.sources.insert(source);
            true
        }
    }
}

