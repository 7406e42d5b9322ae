use appdock_common::{AppId, DockError, EntityKind, Result, WorkspaceId};
use chrono::Utc;
use tracing::{debug, info};

use super::{app_removed_event, app_state_event, Registry};
use crate::model::{AppInstance, AppPatch, AppState, NewApp, Workspace};
use crate::partition::resolve_partition;
use crate::validation::{validate_name, validate_url, validate_zoom};

impl Registry {
    pub fn get_app(&self, id: &AppId) -> Result<AppInstance> {
        self.read()
            .apps
            .iter()
            .find(|app| &app.id == id)
            .cloned()
            .ok_or_else(|| DockError::not_found(EntityKind::App, id))
    }

    /// Apps of one workspace, or all apps when `workspace` is `None`.
    pub fn list_apps(&self, workspace: Option<&WorkspaceId>) -> Vec<AppInstance> {
        self.read()
            .apps
            .iter()
            .filter(|app| workspace.map_or(true, |ws| &app.workspace_id == ws))
            .cloned()
            .collect()
    }

    /// The workspace that owns `id`.
    pub fn workspace_of(&self, id: &AppId) -> Result<Workspace> {
        let state = self.read();
        let app = state
            .apps
            .iter()
            .find(|app| &app.id == id)
            .ok_or_else(|| DockError::not_found(EntityKind::App, id))?;
        state
            .workspaces
            .iter()
            .find(|ws| ws.id == app.workspace_id)
            .cloned()
            .ok_or_else(|| DockError::not_found(EntityKind::Workspace, &app.workspace_id))
    }

    /// Register an app. Its partition key is fixed here and never changes.
    /// The app starts without a surface.
    pub fn create_app(&self, input: NewApp) -> Result<AppInstance> {
        validate_name("name", &input.name)?;
        validate_url(&input.url)?;

        self.mutate(|state| {
            let workspace = state
                .workspaces
                .iter()
                .find(|ws| ws.id == input.workspace_id)
                .ok_or_else(|| DockError::not_found(EntityKind::Workspace, &input.workspace_id))?;
            let id = AppId::new();
            let app = AppInstance {
                partition_key: resolve_partition(workspace, &id),
                id,
                workspace_id: input.workspace_id,
                name: input.name.trim().to_string(),
                url: input.url,
                icon: input.icon,
                state: AppState::fresh(Utc::now()),
            };
            info!(
                app_id = %app.id,
                partition = %app.partition_key,
                "app created"
            );
            state.apps.push(app.clone());
            let event = app_state_event(&app);
            Ok((app, vec![event]))
        })
    }

    /// Patch user-editable fields. Never changes the app's status.
    pub fn update_app(&self, id: &AppId, patch: AppPatch) -> Result<AppInstance> {
        if let Some(name) = &patch.name {
            validate_name("name", name)?;
        }
        if let Some(url) = &patch.url {
            validate_url(url)?;
        }

        self.mutate(|state| {
            let app = state
                .apps
                .iter_mut()
                .find(|app| &app.id == id)
                .ok_or_else(|| DockError::not_found(EntityKind::App, id))?;
            if let Some(name) = patch.name {
                app.name = name.trim().to_string();
            }
            if let Some(url) = patch.url {
                app.url = url;
            }
            if let Some(icon) = patch.icon {
                app.icon = Some(icon);
            }
            let app = app.clone();
            let event = app_state_event(&app);
            Ok((app, vec![event]))
        })
    }

    /// Remove an app record. Callers must release its surface first.
    pub fn delete_app(&self, id: &AppId) -> Result<AppInstance> {
        self.mutate(|state| {
            let index = state
                .apps
                .iter()
                .position(|app| &app.id == id)
                .ok_or_else(|| DockError::not_found(EntityKind::App, id))?;
            let app = state.apps.remove(index);
            info!(app_id = %app.id, "app deleted");
            let event = app_removed_event(&app);
            Ok((app, vec![event]))
        })
    }

    /// Replace an app's runtime state. Reserved for the lifecycle manager.
    pub fn apply_runtime_state(&self, id: &AppId, runtime: AppState) -> Result<AppInstance> {
        validate_zoom(runtime.zoom_level)?;

        self.mutate(|state| {
            let app = state
                .apps
                .iter_mut()
                .find(|app| &app.id == id)
                .ok_or_else(|| DockError::not_found(EntityKind::App, id))?;
            if app.state == runtime {
                return Ok((app.clone(), Vec::new()));
            }
            debug!(app_id = %id, status = %runtime.status, "runtime state applied");
            app.state = runtime;
            let app = app.clone();
            let event = app_state_event(&app);
            Ok((app, vec![event]))
        })
    }
}
