//! Idle hibernation settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HibernationConfig {
    /// Seconds between idle sweeps (valid range: 10-3600).
    pub sweep_interval_secs: u64,
    /// Whether new workspaces hibernate idle apps.
    pub default_enabled: bool,
    /// Idle minutes before hibernation for new workspaces (valid range: 1-1440).
    pub default_idle_minutes: u32,
}

impl Default for HibernationConfig {
    fn default() -> Self {
        Self {
            sweep_interval_secs: 60,
            default_enabled: true,
            default_idle_minutes: 30,
        }
    }
}
