//! Session partition resolution.
//!
//! A partition key selects the cookie/storage jar a surface uses. It is
//! derived once when an app is created and never recomputed, so changing a
//! workspace's session mode only affects apps created afterwards.

use appdock_common::{AppId, SessionMode};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::Workspace;

const PREFIX: &str = "persist:";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartitionKey(String);

impl PartitionKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The key without its `persist:` prefix, suitable for a directory name.
    pub fn scope(&self) -> &str {
        self.0.strip_prefix(PREFIX).unwrap_or(&self.0)
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PartitionKey {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

pub fn resolve_partition(workspace: &Workspace, app_id: &AppId) -> PartitionKey {
    match workspace.session_mode {
        SessionMode::Isolated => PartitionKey(format!("{PREFIX}{app_id}")),
        SessionMode::Shared => PartitionKey(format!("{PREFIX}{}", workspace.id)),
    }
}
