//! Loader for RON content files at startup.

use bevy::prelude::*;
use ron::Options;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use super::data::*;
use super::error::ConfigError;
use super::registry::StageCatalog;
use super::validation::validate_config;

/// Overrides the directory data files are read from.
pub const DATA_DIR_ENV_VAR: &str = "PARTY_JUMP_DATA";
const ASSET_DIR: &str = "assets";
const DATA_SUBDIR: &str = "data";

pub const JUMP_CONFIG_FILE: &str = "party_jump.ron";
pub const STAGES_FILE: &str = "stages.ron";

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// The `assets` directory Bevy's file reader serves, independent of the
/// working directory.
pub fn asset_root() -> PathBuf {
    resolve_asset_root(
        std::env::var_os("BEVY_ASSET_ROOT"),
        std::env::var_os("CARGO_MANIFEST_DIR"),
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf)),
    )
}

/// `assets` under the first base that is set: `BEVY_ASSET_ROOT`, then
/// `CARGO_MANIFEST_DIR`, then the executable's directory.
pub fn resolve_asset_root(
    bevy_asset_root: Option<OsString>,
    manifest_dir: Option<OsString>,
    exe_dir: Option<PathBuf>,
) -> PathBuf {
    bevy_asset_root
        .or(manifest_dir)
        .map(PathBuf::from)
        .or(exe_dir)
        .unwrap_or_default()
        .join(ASSET_DIR)
}

pub fn data_dir() -> PathBuf {
    std::env::var_os(DATA_DIR_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| asset_root().join(DATA_SUBDIR))
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        file: path.display().to_string(),
        source,
    })
}

/// Parse a jump configuration from RON text and check its invariants.
pub fn parse_jump_config(file: &str, contents: &str) -> Result<JumpConfig, Vec<ConfigError>> {
    let config: JumpConfig = ron_options().from_str(contents).map_err(|source| {
        vec![ConfigError::Parse {
            file: file.to_string(),
            source,
        }]
    })?;

    let errors = validate_config(&config);
    if errors.is_empty() {
        Ok(config)
    } else {
        Err(errors)
    }
}

/// Parse a DataFile<StageDef> from RON text.
pub fn parse_stages(file: &str, contents: &str) -> Result<Vec<StageDef>, ConfigError> {
    let data: DataFile<StageDef> =
        ron_options()
            .from_str(contents)
            .map_err(|source| ConfigError::Parse {
                file: file.to_string(),
                source,
            })?;

    if data.items.is_empty() {
        return Err(ConfigError::NoStages {
            file: file.to_string(),
        });
    }
    Ok(data.items)
}

pub fn load_jump_config(path: &Path) -> Result<JumpConfig, Vec<ConfigError>> {
    let contents = read_file(path).map_err(|e| vec![e])?;
    parse_jump_config(&path.display().to_string(), &contents)
}

pub fn load_stages(path: &Path) -> Result<Vec<StageDef>, ConfigError> {
    let contents = read_file(path)?;
    parse_stages(&path.display().to_string(), &contents)
}

/// Startup system: replace the default tuning and stage catalog with the
/// data files. Bad content is logged and the defaults stay in place.
pub(crate) fn load_content(mut commands: Commands) {
    let base = data_dir();

    match load_jump_config(&base.join(JUMP_CONFIG_FILE)) {
        Ok(config) => {
            info!(
                "Loaded jump tuning: charge {}..{} ticks, levels={}, cooldown={}",
                config.min_charge_ticks,
                config.max_charge_ticks,
                config.charge_levels,
                config.cooldown_ticks
            );
            commands.insert_resource(config);
        }
        Err(errors) => {
            for error in &errors {
                error!("{}", error);
            }
            warn!("Falling back to default jump tuning");
        }
    }

    match load_stages(&base.join(STAGES_FILE)) {
        Ok(stages) => {
            let catalog = StageCatalog::new(stages);
            info!("{}", catalog.summary());
            commands.insert_resource(catalog);
        }
        Err(error) => {
            error!("{}", error);
            warn!("Falling back to the built-in stage");
        }
    }
}
