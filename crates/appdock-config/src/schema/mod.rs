//! Configuration schema types for AppDock.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod chrome;
mod hibernation;
mod persistence;
mod system;
mod window;

pub use chrome::*;
pub use hibernation::*;
pub use persistence::*;
pub use system::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for AppDock.
///
/// Only override what you want to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppDockConfig {
    pub chrome: ChromeConfig,
    pub hibernation: HibernationConfig,
    pub persistence: PersistenceConfig,
    pub window: WindowConfig,
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_correct_chrome() {
        let config = AppDockConfig::default();
        assert_eq!(config.chrome.toolbar_height, 40);
        assert_eq!(config.chrome.status_bar_height, 24);
        assert_eq!(config.chrome.dock_min, 48);
        assert_eq!(config.chrome.dock_max, 120);
        assert_eq!(config.chrome.default_dock_size, 64);
    }

    #[test]
    fn default_config_has_correct_hibernation() {
        let config = AppDockConfig::default();
        assert_eq!(config.hibernation.sweep_interval_secs, 60);
        assert!(config.hibernation.default_enabled);
        assert_eq!(config.hibernation.default_idle_minutes, 30);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let toml_str = r#"
[chrome]
toolbar_height = 52

[logging]
level = "DEBUG"
"#;
        let config: AppDockConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.chrome.toolbar_height, 52);
        assert_eq!(config.chrome.status_bar_height, 24);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.window.title, "AppDock");
    }

    #[test]
    fn empty_toml_is_default() {
        let config: AppDockConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppDockConfig::default());
    }
}
