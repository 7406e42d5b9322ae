//! Switching the visible app.

use appdock_common::{AppId, AppStatus, Result};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::ViewLifecycleManager;
use crate::surface::SurfaceBackend;

/// Result of a [`switch_to`](ViewLifecycleManager::switch_to) request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SwitchOutcome {
    Switched,
    /// A newer switch was issued while this one waited. The target was
    /// left background-loaded.
    Superseded,
}

impl<B: SurfaceBackend> ViewLifecycleManager<B> {
    /// Make `id` the visible app, waking it first if it has no surface.
    ///
    /// The hide of the previous surface and the show of the target happen
    /// in one synchronous step. If the target's surface cannot be built the
    /// previous app stays visible and the error is returned. The app's
    /// workspace becomes the current workspace.
    pub async fn switch_to(&self, id: &AppId) -> Result<SwitchOutcome> {
        self.registry.get_app(id)?;
        let generation = self.switch_generation.get() + 1;
        self.switch_generation.set(generation);

        let queue = self.queues.get(id);
        let _guard = queue.lock().await;

        if self.switch_generation.get() != generation {
            info!(app_id = %id, "switch superseded before start");
            return Ok(SwitchOutcome::Superseded);
        }

        // The app may have been deleted while this request waited.
        let app = self.registry.get_app(id)?;
        if !self.has_surface(id) {
            self.create_surface(&app).await?;
        }

        if self.switch_generation.get() != generation {
            info!(app_id = %id, "switch superseded while loading");
            return Ok(SwitchOutcome::Superseded);
        }

        let now = Utc::now();
        let previous = self.current.replace(Some(id.clone()));
        if let Some(prev) = previous.filter(|prev| prev != id) {
            if let Err(e) = self.update_state(&prev, |state| {
                state.status = AppStatus::BackgroundLoaded;
                state.last_active_at = now;
            }) {
                warn!(app_id = %prev, error = %e, "failed to demote previous app");
            }
        }
        self.update_state(id, |state| {
            state.status = AppStatus::Active;
            state.last_active_at = now;
        })?;
        self.registry.set_current_workspace(&app.workspace_id)?;
        self.apply_plan();

        info!(app_id = %id, "switched app");
        Ok(SwitchOutcome::Switched)
    }

    /// Clear the selection so no app is visible. Pending switches are
    /// superseded.
    pub fn switch_away(&self) -> Result<()> {
        self.switch_generation.set(self.switch_generation.get() + 1);
        let previous = self.current.replace(None);
        if let Some(prev) = previous {
            self.update_state(&prev, |state| {
                state.status = AppStatus::BackgroundLoaded;
                state.last_active_at = Utc::now();
            })?;
            info!(app_id = %prev, "switched away");
        }
        self.apply_plan();
        Ok(())
    }
}
