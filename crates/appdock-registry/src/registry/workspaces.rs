use appdock_common::{AppId, ChangeKind, DockError, EntityKind, ProfileId, Result, WorkspaceId};
use tracing::info;

use super::{app_removed_event, workspace_event, Registry};
use crate::model::{Layout, NewWorkspace, Workspace, WorkspacePatch};
use crate::validation::{validate_dock_size, validate_idle_minutes, validate_name};

impl Registry {
    pub fn get_workspace(&self, id: &WorkspaceId) -> Result<Workspace> {
        self.read()
            .workspaces
            .iter()
            .find(|ws| &ws.id == id)
            .cloned()
            .ok_or_else(|| DockError::not_found(EntityKind::Workspace, id))
    }

    /// Workspaces of one profile, or of every profile when `profile` is `None`.
    pub fn list_workspaces(&self, profile: Option<&ProfileId>) -> Vec<Workspace> {
        self.read()
            .workspaces
            .iter()
            .filter(|ws| profile.map_or(true, |p| &ws.profile_id == p))
            .cloned()
            .collect()
    }

    pub fn current_workspace(&self) -> Option<WorkspaceId> {
        self.read().current_workspace.clone()
    }

    pub fn create_workspace(&self, input: NewWorkspace) -> Result<Workspace> {
        validate_name("name", &input.name)?;
        let layout = Layout {
            dock_position: input
                .dock_position
                .unwrap_or(self.settings.default_dock_position),
            dock_size: input.dock_size.unwrap_or(self.settings.default_dock_size),
        };
        self.validate_layout(&layout)?;
        let hibernation = input.hibernation.unwrap_or(self.settings.default_hibernation);
        validate_idle_minutes(hibernation.idle_time_minutes)?;

        self.mutate(|state| {
            if !state.profiles.iter().any(|p| p.id == input.profile_id) {
                return Err(DockError::not_found(EntityKind::Profile, &input.profile_id));
            }
            let workspace = Workspace {
                id: WorkspaceId::new(),
                profile_id: input.profile_id,
                name: input.name.trim().to_string(),
                icon: input.icon,
                layout,
                session_mode: input.session_mode,
                hibernation,
            };
            if state.current_workspace.is_none()
                && state.current_profile.as_ref() == Some(&workspace.profile_id)
            {
                state.current_workspace = Some(workspace.id.clone());
            }
            info!(workspace_id = %workspace.id, name = %workspace.name, "workspace created");
            state.workspaces.push(workspace.clone());
            let event = workspace_event(&workspace, ChangeKind::Created);
            Ok((workspace, vec![event]))
        })
    }

    /// Patch a workspace. A new session mode only applies to apps created
    /// afterwards; existing partition keys are left alone.
    pub fn update_workspace(&self, id: &WorkspaceId, patch: WorkspacePatch) -> Result<Workspace> {
        if let Some(name) = &patch.name {
            validate_name("name", name)?;
        }
        if let Some(layout) = &patch.layout {
            self.validate_layout(layout)?;
        }
        if let Some(hibernation) = &patch.hibernation {
            validate_idle_minutes(hibernation.idle_time_minutes)?;
        }

        self.mutate(|state| {
            let ws = state
                .workspaces
                .iter_mut()
                .find(|ws| &ws.id == id)
                .ok_or_else(|| DockError::not_found(EntityKind::Workspace, id))?;
            if let Some(name) = patch.name {
                ws.name = name.trim().to_string();
            }
            if let Some(icon) = patch.icon {
                ws.icon = Some(icon);
            }
            if let Some(layout) = patch.layout {
                ws.layout = layout;
            }
            if let Some(mode) = patch.session_mode {
                ws.session_mode = mode;
            }
            if let Some(hibernation) = patch.hibernation {
                ws.hibernation = hibernation;
            }
            let ws = ws.clone();
            let event = workspace_event(&ws, ChangeKind::Updated);
            Ok((ws, vec![event]))
        })
    }

    /// Delete a workspace and its apps.
    ///
    /// Callers must release the surfaces of [`apps_in_workspace`](Self::apps_in_workspace)
    /// first.
    pub fn delete_workspace(&self, id: &WorkspaceId) -> Result<Workspace> {
        self.mutate(|state| {
            let index = state
                .workspaces
                .iter()
                .position(|ws| &ws.id == id)
                .ok_or_else(|| DockError::not_found(EntityKind::Workspace, id))?;
            let workspace = state.workspaces.remove(index);

            let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut state.apps)
                .into_iter()
                .partition(|app| &app.workspace_id == id);
            state.apps = kept;

            if state.current_workspace.as_ref() == Some(id) {
                state.current_workspace = None;
            }

            let mut events: Vec<_> = removed.iter().map(app_removed_event).collect();
            events.push(workspace_event(&workspace, ChangeKind::Deleted));
            info!(workspace_id = %workspace.id, apps = removed.len(), "workspace deleted");
            Ok((workspace, events))
        })
    }

    /// Select a workspace. Its profile becomes the current profile.
    pub fn set_current_workspace(&self, id: &WorkspaceId) -> Result<Workspace> {
        self.mutate(|state| {
            let workspace = state
                .workspaces
                .iter()
                .find(|ws| &ws.id == id)
                .cloned()
                .ok_or_else(|| DockError::not_found(EntityKind::Workspace, id))?;
            let unchanged = state.current_workspace.as_ref() == Some(id);
            state.current_workspace = Some(workspace.id.clone());
            state.current_profile = Some(workspace.profile_id.clone());
            let events = if unchanged {
                Vec::new()
            } else {
                vec![workspace_event(&workspace, ChangeKind::Switched)]
            };
            Ok((workspace, events))
        })
    }

    pub fn apps_in_workspace(&self, id: &WorkspaceId) -> Result<Vec<AppId>> {
        let state = self.read();
        if !state.workspaces.iter().any(|ws| &ws.id == id) {
            return Err(DockError::not_found(EntityKind::Workspace, id));
        }
        Ok(state
            .apps
            .iter()
            .filter(|app| &app.workspace_id == id)
            .map(|app| app.id.clone())
            .collect())
    }

    /// The app in `id` that was active most recently, if any.
    pub fn most_recent_app(&self, id: &WorkspaceId) -> Option<AppId> {
        self.read()
            .apps
            .iter()
            .filter(|app| &app.workspace_id == id)
            .max_by_key(|app| app.state.last_active_at)
            .map(|app| app.id.clone())
    }

    fn validate_layout(&self, layout: &Layout) -> Result<()> {
        validate_dock_size(
            layout.dock_size,
            self.settings.dock_size_min,
            self.settings.dock_size_max,
        )
    }
}
