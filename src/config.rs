//! Configuration loading
//!
//! Reads `~/.config/posipick/config.toml`. Every field is optional; a missing
//! file means defaults.

mod types;

use std::path::{Path, PathBuf};

use crate::error::PosipickError;

pub use types::{ApiConfig, Config, DEFAULT_BASE_URL, LocalConfig, PickerConfig};

/// Default location of the config file
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("posipick").join("config.toml"))
}

/// Load the config file at `path`
///
/// A missing file yields defaults; an unreadable or malformed one is an error.
pub fn load_config_from_path(path: &Path) -> Result<Config, PosipickError> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| PosipickError::Config(e.to_string()))
}

/// Load the config from its default location, falling back to defaults
pub fn load_config() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };

    match load_config_from_path(&path) {
        Ok(config) => config,
        Err(e) => {
            log::debug!("Ignoring config at {}: {}", path.display(), e);
            Config::default()
        }
    }
}
