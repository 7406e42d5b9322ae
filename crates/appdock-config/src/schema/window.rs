//! Window configuration types.

use serde::{Deserialize, Serialize};

/// Initial window appearance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Initial logical width (valid range: 480-7680).
    pub width: u32,
    /// Initial logical height (valid range: 320-4320).
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "AppDock".into(),
            width: 1280,
            height: 800,
        }
    }
}
