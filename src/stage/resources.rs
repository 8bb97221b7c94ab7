//! Stage domain: active stage and the leader's recent path.

use bevy::prelude::*;
use std::collections::VecDeque;

#[derive(Resource, Debug, Default)]
pub struct ActiveStage {
    pub index: usize,
    pub id: String,
}

/// Tiles the leader recently left, newest first. Follower `i` heads for
/// slot `i`.
#[derive(Resource, Debug, Default)]
pub struct PartyTrail {
    tiles: VecDeque<IVec2>,
    capacity: usize,
    last_leader_tile: Option<IVec2>,
}

impl PartyTrail {
    /// A trail for `followers` members, all standing on `start`.
    pub fn new(start: IVec2, followers: usize) -> Self {
        Self {
            tiles: std::iter::repeat_n(start, followers).collect(),
            capacity: followers,
            last_leader_tile: Some(start),
        }
    }

    /// Record the leader's current tile. Returns true if it moved.
    pub fn record(&mut self, leader_tile: IVec2) -> bool {
        match self.last_leader_tile {
            Some(last) if last == leader_tile => false,
            Some(last) => {
                self.tiles.push_front(last);
                self.tiles.truncate(self.capacity);
                self.last_leader_tile = Some(leader_tile);
                true
            }
            None => {
                self.last_leader_tile = Some(leader_tile);
                false
            }
        }
    }

    pub fn slot(&self, index: usize) -> Option<IVec2> {
        self.tiles.get(index).copied()
    }
}
