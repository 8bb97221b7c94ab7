//! StageCatalog resource providing ordered access to the loaded stages.

use bevy::prelude::*;

use super::data::{ObstacleDef, StageDef};

/// Every stage the demo can switch between, in file order.
/// Never empty: it falls back to a single built-in stage.
#[derive(Resource, Debug, Clone)]
pub struct StageCatalog {
    stages: Vec<StageDef>,
}

impl Default for StageCatalog {
    fn default() -> Self {
        Self {
            stages: vec![builtin_stage()],
        }
    }
}

impl StageCatalog {
    pub fn new(stages: Vec<StageDef>) -> Self {
        if stages.is_empty() {
            Self::default()
        } else {
            Self { stages }
        }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage at `index`, wrapping around the end of the catalog.
    pub fn get_wrapped(&self, index: usize) -> &StageDef {
        &self.stages[index % self.stages.len()]
    }

    /// Returns a summary of loaded stages for logging.
    pub fn summary(&self) -> String {
        let names: Vec<&str> = self.stages.iter().map(|s| s.name.as_str()).collect();
        format!(
            "StageCatalog loaded {} stage(s): {}",
            self.stages.len(),
            names.join(", ")
        )
    }
}

fn builtin_stage() -> StageDef {
    StageDef {
        id: "stage_courtyard".to_string(),
        name: "Courtyard".to_string(),
        rows: vec![
            "############".to_string(),
            "#..........#".to_string(),
            "#..........#".to_string(),
            "#....##....#".to_string(),
            "#..........#".to_string(),
            "#..........#".to_string(),
            "############".to_string(),
        ],
        party_start: (3, 4),
        followers: 3,
        obstacles: vec![ObstacleDef {
            label: "crate".to_string(),
            x: 8,
            y: 2,
            blocking: true,
        }],
    }
}
