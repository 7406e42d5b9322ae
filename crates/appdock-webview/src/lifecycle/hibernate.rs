//! Hibernation, wake, destruction, and session clearing.

use appdock_common::{AppId, AppStatus, DockError, Result, WorkspaceId};
use tracing::{info, warn};

use super::ViewLifecycleManager;
use crate::surface::{Surface, SurfaceBackend, SurfaceError};

impl<B: SurfaceBackend> ViewLifecycleManager<B> {
    /// Build a hidden surface for an app that has none.
    pub async fn create(&self, id: &AppId) -> Result<()> {
        let queue = self.queues.get(id);
        let _guard = queue.lock().await;

        let app = self.registry.get_app(id)?;
        if self.has_surface(id) {
            return Ok(());
        }
        self.create_surface(&app).await
    }

    /// Release an app's surface while keeping its state.
    ///
    /// Rejected for the current app; callers switch away first. Returns
    /// whether a surface was released. Hibernating an app without a surface
    /// is a no-op.
    pub async fn hibernate(&self, id: &AppId) -> Result<bool> {
        let queue = self.queues.get(id);
        let _guard = queue.lock().await;

        let app = self.registry.get_app(id)?;
        if self.current.borrow().as_ref() == Some(id) {
            return Err(DockError::validation(
                "cannot hibernate the active app, switch away first",
            ));
        }

        let released = self.release_surface(id, &app.partition_key).await;
        if app.state.status != AppStatus::Hibernated {
            self.update_state(id, |state| state.status = AppStatus::Hibernated)?;
        }
        if released {
            info!(app_id = %id, "app hibernated");
        }
        Ok(released)
    }

    /// Rebuild a hibernated app's surface, reloading from its url. No-op
    /// if the surface exists.
    pub async fn wake(&self, id: &AppId) -> Result<()> {
        self.create(id).await?;
        info!(app_id = %id, "app awake");
        Ok(())
    }

    /// Release an app's surface ahead of deleting it.
    ///
    /// Clears the selection if the app is current. A pending switch to
    /// another app is left to complete.
    pub async fn destroy(&self, id: &AppId) -> Result<()> {
        let app = self.registry.get_app(id)?;
        {
            let queue = self.queues.get(id);
            let _guard = queue.lock().await;

            let was_current = self.current.borrow().as_ref() == Some(id);
            if was_current {
                self.current.replace(None);
            }
            self.release_surface(id, &app.partition_key).await;
            if was_current {
                self.apply_plan();
            }
        }
        self.queues.remove(id);
        info!(app_id = %id, "app surface destroyed");
        Ok(())
    }

    /// Release every surface of a workspace.
    pub async fn destroy_workspace(&self, workspace: &WorkspaceId) -> Result<()> {
        for id in self.registry.apps_in_workspace(workspace)? {
            self.destroy(&id).await?;
        }
        Ok(())
    }

    /// Wipe cookies and storage for the app's partition.
    ///
    /// In a shared workspace this clears every app on the same partition;
    /// the affected apps are returned. Live surfaces on the partition are
    /// reloaded. A failed clear is retried once.
    pub async fn clear_session(&self, id: &AppId) -> Result<Vec<AppId>> {
        let queue = self.queues.get(id);
        let _guard = queue.lock().await;

        let app = self.registry.get_app(id)?;
        let partition = app.partition_key;
        let affected: Vec<AppId> = self
            .registry
            .list_apps(None)
            .into_iter()
            .filter(|other| other.partition_key == partition)
            .map(|other| other.id)
            .collect();

        let surfaces = self.surfaces.borrow();
        let live: Vec<_> = affected.iter().filter_map(|a| surfaces.get(a)).collect();

        let result = self
            .backend
            .clear_partition(&partition, &live)
            .or_else(|e| {
                warn!(partition = %partition, error = %e, "partition clear failed, retrying");
                self.backend.clear_partition(&partition, &live)
            });
        if let Err(e) = result {
            warn!(partition = %partition, error = %e, "partition clear failed");
            return Err(match e {
                SurfaceError::Clear(msg) => DockError::PartitionClearFailed(msg),
                other => DockError::PartitionClearFailed(other.to_string()),
            });
        }

        for surface in &live {
            if let Err(e) = surface.reload() {
                warn!(partition = %partition, error = %e, "reload after clear failed");
            }
        }

        info!(partition = %partition, apps = affected.len(), "session cleared");
        Ok(affected)
    }

    /// Destroy every surface. Used on exit.
    pub async fn shutdown(&self) {
        self.current.replace(None);
        let surfaces: Vec<_> = self.surfaces.borrow_mut().drain().collect();
        let count = surfaces.len();
        for (_, surface) in surfaces {
            self.backend.destroy(surface).await;
        }
        info!(count, "lifecycle manager shut down");
    }
}
