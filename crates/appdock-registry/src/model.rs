//! Entity types and the input shapes used to create or patch them.

use appdock_common::{AppId, AppStatus, DockPosition, ProfileId, SessionMode, WorkspaceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::partition::PartitionKey;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub dock_position: DockPosition,
    pub dock_size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HibernationPolicy {
    pub enabled: bool,
    pub idle_time_minutes: u32,
}

impl Default for HibernationPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            idle_time_minutes: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: WorkspaceId,
    pub profile_id: ProfileId,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub layout: Layout,
    pub session_mode: SessionMode,
    pub hibernation: HibernationPolicy,
}

/// Runtime state of an app. Survives hibernation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub status: AppStatus,
    pub badge_count: u32,
    pub zoom_level: f64,
    pub last_active_at: DateTime<Utc>,
}

impl AppState {
    pub fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            status: AppStatus::Hibernated,
            badge_count: 0,
            zoom_level: 1.0,
            last_active_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInstance {
    pub id: AppId,
    pub workspace_id: WorkspaceId,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub state: AppState,
    pub partition_key: PartitionKey,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProfile {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    pub name: Option<String>,
}

/// Fields for a new workspace. Omitted layout and hibernation values take
/// the configured defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkspace {
    pub profile_id: ProfileId,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub dock_position: Option<DockPosition>,
    #[serde(default)]
    pub dock_size: Option<u32>,
    #[serde(default)]
    pub session_mode: SessionMode,
    #[serde(default)]
    pub hibernation: Option<HibernationPolicy>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspacePatch {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub layout: Option<Layout>,
    pub session_mode: Option<SessionMode>,
    pub hibernation: Option<HibernationPolicy>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApp {
    pub workspace_id: WorkspaceId,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Editable app fields. Status is owned by the lifecycle manager and is
/// deliberately absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppPatch {
    pub name: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
}
