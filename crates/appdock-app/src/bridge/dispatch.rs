//! Command execution.

use appdock_common::{DockError, ProfileId, Result, WorkspaceId};
use appdock_webview::SurfaceBackend;
use serde::Serialize;
use serde_json::{json, Value};

use super::protocol::Command;
use super::CommandBridge;

fn to_data<T: Serialize>(value: T) -> Result<Value> {
    serde_json::to_value(value)
        .map_err(|e| DockError::validation(format!("response not serializable: {e}")))
}

impl<B: SurfaceBackend> CommandBridge<B> {
    pub(super) async fn dispatch(&self, command: Command) -> Result<Value> {
        let lifecycle = &self.lifecycle;
        let registry = lifecycle.registry();

        match command {
            Command::ProfileGet { id } => to_data(registry.get_profile(&id)?),
            Command::ProfileList {} => to_data(registry.list_profiles()),
            Command::ProfileCreate(input) => to_data(registry.create_profile(input)?),
            Command::ProfileUpdate { id, patch } => to_data(registry.update_profile(&id, patch)?),
            Command::ProfileDelete { id } => {
                self.release_profile(&id).await?;
                to_data(registry.delete_profile(&id)?)
            }
            Command::ProfileSwitch { id } => {
                let profile = registry.set_current_profile(&id)?;
                self.show_current_workspace().await?;
                to_data(profile)
            }

            Command::WorkspaceList { profile_id } => {
                to_data(registry.list_workspaces(profile_id.as_ref()))
            }
            Command::WorkspaceCreate(input) => to_data(registry.create_workspace(input)?),
            Command::WorkspaceUpdate { id, patch } => {
                let workspace = registry.update_workspace(&id, patch)?;
                lifecycle.relayout();
                to_data(workspace)
            }
            Command::WorkspaceDelete { id } => {
                registry.get_workspace(&id)?;
                lifecycle.destroy_workspace(&id).await?;
                to_data(registry.delete_workspace(&id)?)
            }
            Command::WorkspaceSwitch { id } => {
                let workspace = registry.set_current_workspace(&id)?;
                self.show_workspace(&id).await?;
                to_data(workspace)
            }

            Command::AppList { workspace_id } => to_data(registry.list_apps(workspace_id.as_ref())),
            Command::AppCreate(input) => {
                let app = registry.create_app(input)?;
                if let Err(e) = lifecycle.create(&app.id).await {
                    lifecycle.destroy(&app.id).await?;
                    registry.delete_app(&app.id)?;
                    return Err(e);
                }
                to_data(registry.get_app(&app.id)?)
            }
            Command::AppUpdate { id, patch } => to_data(lifecycle.update_app(&id, patch)?),
            Command::AppDelete { id } => {
                lifecycle.destroy(&id).await?;
                to_data(registry.delete_app(&id)?)
            }
            Command::AppSwitch { id } => {
                let outcome = lifecycle.switch_to(&id).await?;
                Ok(json!({ "outcome": outcome, "app": registry.get_app(&id)? }))
            }
            Command::AppHibernate { id } => {
                let released = lifecycle.hibernate(&id).await?;
                Ok(json!({ "released": released, "app": registry.get_app(&id)? }))
            }
            Command::AppWake { id } => {
                lifecycle.wake(&id).await?;
                to_data(registry.get_app(&id)?)
            }
            Command::AppClearSession { id } => {
                let affected = lifecycle.clear_session(&id).await?;
                Ok(json!({ "affected": affected }))
            }
            Command::AppReload { id } => {
                lifecycle.reload(&id)?;
                to_data(registry.get_app(&id)?)
            }
            Command::AppSetZoom { id, level } => to_data(lifecycle.set_zoom(&id, level)?),

            Command::ViewSetModal { open } => {
                lifecycle.set_modal_open(open);
                Ok(json!({ "modalOpen": open }))
            }
            Command::ViewRefresh {} => {
                lifecycle.refresh_visibility();
                Ok(json!({ "current": lifecycle.current() }))
            }

            Command::StateSnapshot {} => to_data(registry.snapshot()),

            Command::EventsSubscribe { channel } => {
                let added = self.subscriptions.borrow_mut().subscribe(&channel)?;
                Ok(json!({ "channel": channel, "added": added }))
            }
            Command::EventsUnsubscribe { channel } => {
                let removed = self.subscriptions.borrow_mut().unsubscribe(&channel);
                Ok(json!({ "channel": channel, "removed": removed }))
            }
        }
    }

    /// Show the most recently used app of a workspace, or nothing if it
    /// has no apps.
    async fn show_workspace(&self, id: &WorkspaceId) -> Result<()> {
        match self.lifecycle.registry().most_recent_app(id) {
            Some(app) => {
                self.lifecycle.switch_to(&app).await?;
            }
            None => self.lifecycle.switch_away()?,
        }
        Ok(())
    }

    async fn show_current_workspace(&self) -> Result<()> {
        match self.lifecycle.registry().current_workspace() {
            Some(ws) => self.show_workspace(&ws).await,
            None => self.lifecycle.switch_away(),
        }
    }

    /// Destroy the surfaces of every workspace in a profile.
    async fn release_profile(&self, id: &ProfileId) -> Result<()> {
        let registry = self.lifecycle.registry();
        registry.get_profile(id)?;
        for ws in registry.list_workspaces(Some(id)) {
            self.lifecycle.destroy_workspace(&ws.id).await?;
        }
        Ok(())
    }
}
