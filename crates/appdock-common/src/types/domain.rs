use serde::{Deserialize, Serialize};
use std::fmt;

/// Window edge the dock is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DockPosition {
    Top,
    Bottom,
    #[default]
    Left,
    Right,
}

/// Whether apps in a workspace share one storage partition or get one each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    #[default]
    Isolated,
    Shared,
}

/// Runtime status of an app's surface.
///
/// `Hibernated` doubles as the state of an app that has no surface yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum AppStatus {
    Active,
    BackgroundLoaded,
    #[default]
    Hibernated,
}

impl AppStatus {
    /// Whether a native surface exists for an app in this status.
    pub fn has_surface(self) -> bool {
        !matches!(self, Self::Hibernated)
    }
}

impl fmt::Display for AppStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Active => "active",
            Self::BackgroundLoaded => "backgroundLoaded",
            Self::Hibernated => "hibernated",
        };
        f.write_str(name)
    }
}
