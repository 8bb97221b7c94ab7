//! Content domain: RON-backed jump tuning and demo stage definitions.

mod data;
mod error;
mod loader;
mod registry;
mod validation;


pub use data::{CueDef, DataFile, InputConfig, JumpConfig, ObstacleDef, SoundConfig, StageDef};
pub use error::ConfigError;
pub use loader::{
    DATA_DIR_ENV_VAR, asset_root, data_dir, load_jump_config, load_stages, parse_jump_config,
    parse_stages, resolve_asset_root,
};
pub use registry::StageCatalog;
pub use validation::validate_config;

use bevy::prelude::*;

use crate::content::loader::load_content;

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<JumpConfig>()
            .init_resource::<StageCatalog>()
            .add_systems(PreStartup, load_content);
    }
}
