//! Core TOML config loading: read from path or platform default.

use crate::schema::AppDockConfig;
use crate::validation;
use appdock_common::ConfigError;
use std::path::Path;
use tracing::{info, warn};

use super::paths::{create_default_config, default_config_path};

/// Load config from a specific TOML file path.
///
/// Deserializes the file using serde defaults for any missing fields.
/// If the parsed config fails validation, a warning is logged and the
/// default config is returned instead.
pub fn load_from_path(path: &Path) -> Result<AppDockConfig, ConfigError> {
    let config = parse_file(path)?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
        warn!("falling back to default config");
        return Ok(AppDockConfig::default());
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Read and deserialize a config file without validating it.
pub fn parse_file(path: &Path) -> Result<AppDockConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))
}

/// Load config from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/appdock/config.toml`
/// On Linux: `~/.config/appdock/config.toml`
///
/// If the file does not exist, creates a default config file and returns defaults.
pub fn load_default() -> Result<AppDockConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(&path)?;
            Ok(AppDockConfig::default())
        }
        Err(e) => Err(e),
    }
}
