//! Operations on live surfaces: zoom, reload, title tracking, layout and
//! modal visibility.

use appdock_common::{AppId, Event, Notification, Result, Size};
use appdock_registry::{AppInstance, AppPatch};
use tracing::{debug, info, warn};

use super::ViewLifecycleManager;
use crate::badge::parse_badge;
use crate::surface::{Surface, SurfaceBackend};

impl<B: SurfaceBackend> ViewLifecycleManager<B> {
    /// Reload an app's content from the network. No-op when hibernated.
    pub fn reload(&self, id: &AppId) -> Result<()> {
        self.registry.get_app(id)?;
        if let Some(surface) = self.surfaces.borrow().get(id) {
            surface.reload()?;
            debug!(app_id = %id, "surface reloaded");
        }
        Ok(())
    }

    /// Store a new zoom level and apply it to the live surface, if any.
    pub fn set_zoom(&self, id: &AppId, level: f64) -> Result<AppInstance> {
        let app = self.update_state(id, |state| state.zoom_level = level)?;
        if let Some(surface) = self.surfaces.borrow().get(id) {
            surface.set_zoom(level)?;
        }
        Ok(app)
    }

    /// Patch an app and navigate its live surface if the url changed.
    pub fn update_app(&self, id: &AppId, patch: AppPatch) -> Result<AppInstance> {
        let before = self.registry.get_app(id)?;
        let app = self.registry.update_app(id, patch)?;
        if app.url != before.url {
            if let Some(surface) = self.surfaces.borrow().get(id) {
                surface.load_url(&app.url)?;
            }
        }
        Ok(app)
    }

    /// Track an app's document title. A leading `(N)` sets the badge
    /// count; a growing count raises a notification.
    pub fn record_title(&self, id: &AppId, title: &str) -> Result<()> {
        let app = self.registry.get_app(id)?;
        let count = parse_badge(title).unwrap_or(0);
        let previous = app.state.badge_count;
        if count == previous {
            return Ok(());
        }

        self.update_state(id, |state| state.badge_count = count)?;
        if count > previous {
            let body = match count - previous {
                1 => "1 new item".to_string(),
                n => format!("{n} new items"),
            };
            let notification = Notification::info(app.name.clone(), body).for_app(id.clone());
            self.bus().publish(Event::Notification(notification));
        }
        debug!(app_id = %id, count, "badge updated");
        Ok(())
    }

    /// Hide every surface while a modal is open. Closing the modal does
    /// not show anything; call [`refresh_visibility`](Self::refresh_visibility).
    pub fn set_modal_open(&self, open: bool) {
        self.modal_open.set(open);
        if open {
            self.apply_plan();
        }
        info!(open, "modal state changed");
    }

    /// Re-apply the visibility decision for the current selection.
    pub fn refresh_visibility(&self) {
        self.apply_plan();
    }

    /// Record a new window size and reposition the visible surface.
    pub fn set_window_size(&self, size: Size) {
        self.window.set(size);
        self.relayout();
    }

    /// Reposition the visible surface after a window or dock change.
    pub fn relayout(&self) {
        if self.modal_open.get() {
            return;
        }
        let Some(id) = self.current() else {
            return;
        };
        let bounds = match self
            .registry
            .get_app(&id)
            .and_then(|app| self.bounds_for(&app.workspace_id))
        {
            Ok(bounds) => bounds,
            Err(e) => {
                warn!(app_id = %id, error = %e, "relayout skipped");
                return;
            }
        };
        if let Some(surface) = self.surfaces.borrow().get(&id) {
            if let Err(e) = surface.set_bounds(bounds) {
                warn!(app_id = %id, error = %e, "failed to reposition surface");
            }
        }
    }
}
