use std::path::{Path, PathBuf};

use seatplan_core::FloorPlan;
use serde::Deserialize;

use crate::error::SeatsError;

#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Floor plan TOML to load instead of the built-in office.
    pub plan: Option<PathBuf>,
    /// Where tracing output goes; logging is off when unset.
    pub log_file: Option<PathBuf>,
    /// Show the office pet (default: true).
    pub pet: Option<bool>,
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("seatplan").join("config.toml"))
}

pub fn load_config() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    load_config_from(&path)
}

fn load_config_from(path: &Path) -> Config {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Config::default();
    };

    toml::from_str(&content).unwrap_or_default()
}

/// Settings after merging CLI flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub plan: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub pet: bool,
}

pub fn resolve_settings(
    config: Config,
    cli_plan: Option<PathBuf>,
    cli_log: Option<PathBuf>,
    cli_no_pet: bool,
) -> Settings {
    Settings {
        plan: cli_plan.or(config.plan),
        log_file: cli_log.or(config.log_file),
        pet: !cli_no_pet && config.pet.unwrap_or(true),
    }
}

/// Reads the configured plan, or the built-in one when none is set.
pub fn load_plan(path: Option<&Path>) -> Result<FloorPlan, SeatsError> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path).map_err(|source| SeatsError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(FloorPlan::from_toml_str(&content)?)
        }
        None => Ok(FloorPlan::builtin()?),
    }
}
