//! AppDock configuration system.
//!
//! Provides TOML-based configuration with live reload and full
//! validation. All config sections use sensible defaults so partial
//! configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use appdock_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod reload;
pub mod schema;
pub mod toml_loader;
pub mod validation;
pub mod watcher;

pub use reload::ReloadManager;
pub use schema::{AppDockConfig, CONFIG_SCHEMA_VERSION};
pub use watcher::ConfigWatcher;

use appdock_common::ConfigError;
use std::path::Path;

/// Load config from the platform default path.
///
/// Loads `config.toml` from the OS config directory, creating a default
/// if none exists, and validates the result.
pub fn load_config() -> Result<AppDockConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path, falling back to defaults when the
/// file is missing.
pub fn load_config_from(path: &Path) -> Result<AppDockConfig, ConfigError> {
    match toml_loader::load_from_path(path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            tracing::info!("no config at {}, using defaults", path.display());
            Ok(AppDockConfig::default())
        }
        Err(e) => Err(e),
    }
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &AppDockConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let config = AppDockConfig::default();
        let json = config_to_json(&config);
        assert!(json.contains("\"chrome\""));
        assert!(json.contains("\"hibernation\""));
        assert!(json.contains("\"persistence\""));
        assert!(json.contains("\"window\""));
        assert!(json.contains("\"logging\""));
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn load_config_from_missing_path_uses_defaults() {
        let config = load_config_from(Path::new("/tmp/appdock_missing_cfg.toml")).unwrap();
        assert_eq!(config, AppDockConfig::default());
    }
}
