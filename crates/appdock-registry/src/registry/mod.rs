//! The entity registry: single source of truth for profiles, workspaces,
//! and app instances.
//!
//! All mutators validate first and fail with `NotFound` or `Validation`
//! without touching state. A successful mutation is applied to the
//! in-memory copy, published on the event bus, and submitted to the
//! flusher. The current workspace is a runtime-only pointer.

mod apps;
mod profiles;
mod workspaces;

#[cfg(test)]
mod tests;

use appdock_common::{
    AppStatus, ChangeKind, DockPosition, Event, EventBus, ProfileId, Result, WorkspaceId,
};
use appdock_config::AppDockConfig;
use serde::Serialize;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{info, warn};

use crate::model::{AppInstance, HibernationPolicy, Layout, Profile, Workspace};
use crate::store::{FlushHandle, PersistedState};

pub const DEFAULT_PROFILE_NAME: &str = "Default";
pub const DEFAULT_WORKSPACE_NAME: &str = "Home";

/// Defaults and bounds the registry validates against.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrySettings {
    pub dock_size_min: u32,
    pub dock_size_max: u32,
    pub default_dock_size: u32,
    pub default_dock_position: DockPosition,
    pub default_hibernation: HibernationPolicy,
}

impl RegistrySettings {
    pub fn from_config(config: &AppDockConfig) -> Self {
        Self {
            dock_size_min: config.chrome.dock_min,
            dock_size_max: config.chrome.dock_max,
            default_dock_size: config.chrome.default_dock_size,
            default_dock_position: DockPosition::default(),
            default_hibernation: HibernationPolicy {
                enabled: config.hibernation.default_enabled,
                idle_time_minutes: config.hibernation.default_idle_minutes,
            },
        }
    }

    fn default_layout(&self) -> Layout {
        Layout {
            dock_position: self.default_dock_position,
            dock_size: self.default_dock_size,
        }
    }
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self::from_config(&AppDockConfig::default())
    }
}

/// Read-only copy of the whole registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub profiles: Vec<Profile>,
    pub workspaces: Vec<Workspace>,
    pub apps: Vec<AppInstance>,
    pub current_profile: Option<ProfileId>,
    pub current_workspace: Option<WorkspaceId>,
}

#[derive(Debug, Default)]
struct RegistryState {
    profiles: Vec<Profile>,
    workspaces: Vec<Workspace>,
    apps: Vec<AppInstance>,
    current_profile: Option<ProfileId>,
    current_workspace: Option<WorkspaceId>,
}

impl RegistryState {
    fn persisted(&self) -> PersistedState {
        PersistedState {
            profiles: self.profiles.clone(),
            workspaces: self.workspaces.clone(),
            apps: self.apps.clone(),
            current_profile: self.current_profile.clone(),
        }
    }

    fn first_workspace_of(&self, profile_id: &ProfileId) -> Option<WorkspaceId> {
        self.workspaces
            .iter()
            .find(|ws| &ws.profile_id == profile_id)
            .map(|ws| ws.id.clone())
    }
}

pub struct Registry {
    state: RwLock<RegistryState>,
    settings: RegistrySettings,
    bus: EventBus,
    flush: FlushHandle,
}

impl Registry {
    /// Build the registry from persisted state.
    ///
    /// No surfaces exist in a fresh process, so every app is normalized to
    /// hibernated. Orphaned records are dropped, and an empty store is
    /// seeded with a default profile and workspace.
    pub fn load(
        persisted: PersistedState,
        settings: RegistrySettings,
        bus: EventBus,
        flush: FlushHandle,
    ) -> Self {
        let mut state = RegistryState {
            profiles: persisted.profiles,
            workspaces: persisted.workspaces,
            apps: persisted.apps,
            current_profile: persisted.current_profile,
            current_workspace: None,
        };
        let mut dirty = false;

        for app in &mut state.apps {
            app.state.status = AppStatus::Hibernated;
        }

        let before = (state.workspaces.len(), state.apps.len());
        let profiles = &state.profiles;
        state
            .workspaces
            .retain(|ws| profiles.iter().any(|p| p.id == ws.profile_id));
        let workspaces = &state.workspaces;
        state
            .apps
            .retain(|app| workspaces.iter().any(|ws| ws.id == app.workspace_id));
        if before != (state.workspaces.len(), state.apps.len()) {
            warn!(
                dropped_workspaces = before.0 - state.workspaces.len(),
                dropped_apps = before.1 - state.apps.len(),
                "dropped orphaned records from store"
            );
            dirty = true;
        }

        if state.profiles.is_empty() {
            seed_defaults(&mut state, &settings);
            dirty = true;
        }

        let current_valid = state
            .current_profile
            .as_ref()
            .is_some_and(|id| state.profiles.iter().any(|p| &p.id == id));
        if !current_valid {
            state.current_profile = state.profiles.first().map(|p| p.id.clone());
            dirty = true;
        }
        state.current_workspace = state
            .current_profile
            .as_ref()
            .and_then(|id| state.first_workspace_of(id));

        info!(
            profiles = state.profiles.len(),
            workspaces = state.workspaces.len(),
            apps = state.apps.len(),
            "registry loaded"
        );

        let registry = Self {
            state: RwLock::new(state),
            settings,
            bus,
            flush,
        };
        if dirty {
            registry.persist();
        }
        registry
    }

    pub fn settings(&self) -> &RegistrySettings {
        &self.settings
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = self.read();
        Snapshot {
            profiles: state.profiles.clone(),
            workspaces: state.workspaces.clone(),
            apps: state.apps.clone(),
            current_profile: state.current_profile.clone(),
            current_workspace: state.current_workspace.clone(),
        }
    }

    /// Submit the current state to the flusher.
    pub fn persist(&self) {
        let persisted = self.read().persisted();
        self.flush.submit(persisted);
    }

    /// Write pending state and stop the flusher.
    pub async fn shutdown(&self) {
        self.flush.shutdown().await;
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Run a validated mutation, then persist and publish its events.
    ///
    /// `f` must return `Err` before changing anything.
    fn mutate<T>(
        &self,
        f: impl FnOnce(&mut RegistryState) -> Result<(T, Vec<Event>)>,
    ) -> Result<T> {
        let (value, events, persisted) = {
            let mut state = self.write();
            let (value, events) = f(&mut state)?;
            (value, events, state.persisted())
        };
        self.flush.submit(persisted);
        for event in events {
            self.bus.publish(event);
        }
        Ok(value)
    }
}

fn seed_defaults(state: &mut RegistryState, settings: &RegistrySettings) {
    let profile = Profile {
        id: ProfileId::new(),
        name: DEFAULT_PROFILE_NAME.to_string(),
    };
    let workspace = Workspace {
        id: WorkspaceId::new(),
        profile_id: profile.id.clone(),
        name: DEFAULT_WORKSPACE_NAME.to_string(),
        icon: None,
        layout: settings.default_layout(),
        session_mode: Default::default(),
        hibernation: settings.default_hibernation,
    };
    info!(profile_id = %profile.id, workspace_id = %workspace.id, "seeded default profile");
    state.current_profile = Some(profile.id.clone());
    state.profiles.push(profile);
    state.workspaces.push(workspace);
}

fn app_state_event(app: &AppInstance) -> Event {
    Event::AppStateChanged {
        app_id: app.id.clone(),
        workspace_id: app.workspace_id.clone(),
        status: app.state.status,
        badge_count: app.state.badge_count,
        zoom_level: app.state.zoom_level,
        active: app.state.status == AppStatus::Active,
    }
}

fn workspace_event(ws: &Workspace, change: ChangeKind) -> Event {
    Event::WorkspaceChanged {
        workspace_id: ws.id.clone(),
        profile_id: ws.profile_id.clone(),
        change,
    }
}

fn app_removed_event(app: &AppInstance) -> Event {
    Event::AppRemoved {
        app_id: app.id.clone(),
        workspace_id: app.workspace_id.clone(),
    }
}
