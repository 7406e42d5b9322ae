//! Window chrome constants consumed by the bounds coordinator.

use serde::{Deserialize, Serialize};

/// Fixed chrome offsets and dock-size bounds, in logical pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    /// Height of the top toolbar (valid range: 0-200).
    pub toolbar_height: u32,
    /// Height of the bottom status bar (valid range: 0-100).
    pub status_bar_height: u32,
    /// Smallest dock size a workspace may use.
    pub dock_min: u32,
    /// Largest dock size a workspace may use.
    pub dock_max: u32,
    /// Dock size given to new workspaces.
    pub default_dock_size: u32,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            toolbar_height: 40,
            status_bar_height: 24,
            dock_min: 48,
            dock_max: 120,
            default_dock_size: 64,
        }
    }
}
