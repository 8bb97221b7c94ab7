//! Core domain: lifecycle messages raised by the host.

use bevy::ecs::message::Message;

/// Event fired when the active map is replaced by another one
#[derive(Debug, Clone)]
pub struct MapChangedEvent {
    pub map_id: String,
}

impl Message for MapChangedEvent {}

/// Event fired after a save file has been restored
#[derive(Debug, Clone, Default)]
pub struct SaveLoadedEvent;

impl Message for SaveLoadedEvent {}
