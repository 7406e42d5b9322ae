//! Persisted-store settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// File name of the store inside the data directory.
    pub file_name: String,
    /// First retry delay after a failed flush, in milliseconds.
    pub retry_initial_ms: u64,
    /// Upper bound for the exponential retry delay, in milliseconds.
    pub retry_max_ms: u64,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            file_name: "store.json".into(),
            retry_initial_ms: 250,
            retry_max_ms: 30_000,
        }
    }
}
