//! View lifecycle manager.
//!
//! Owns one native surface per loaded app and drives each app through
//! its states:
//!
//! ```text
//!  hibernated --(create | wake)--> backgroundLoaded --(switch_to)--> active
//!  active --(switch_away | switch to another app)--> backgroundLoaded
//!  backgroundLoaded --(hibernate | idle sweep)--> hibernated
//!  any --(destroy)--> gone
//! ```
//!
//! At most one surface is visible, the one bound to the current app.
//! Runtime state changes are written back through
//! [`Registry::apply_runtime_state`], which publishes `app:state-changed`.

mod hibernate;
mod queue;
mod sweep;
mod switch;
mod view;


pub use sweep::SweepSchedule;
pub use switch::SwitchOutcome;

use appdock_common::{AppId, AppStatus, EventBus, Rect, Result, Size, WorkspaceId};
use appdock_registry::{AppInstance, AppState, PartitionKey, Registry};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::bounds::{apply_visibility, compute_bounds, ChromeInsets, VisibilityPlan};
use crate::surface::{Surface, SurfaceBackend, SurfaceRequest};
use queue::RequestQueues;

pub struct ViewLifecycleManager<B: SurfaceBackend> {
    backend: B,
    registry: Arc<Registry>,
    surfaces: RefCell<HashMap<AppId, B::Surface>>,
    queues: RequestQueues,
    current: RefCell<Option<AppId>>,
    switch_generation: Cell<u64>,
    window: Cell<Size>,
    chrome: ChromeInsets,
    modal_open: Cell<bool>,
}

impl<B: SurfaceBackend> ViewLifecycleManager<B> {
    pub fn new(backend: B, registry: Arc<Registry>, window: Size, chrome: ChromeInsets) -> Self {
        Self {
            backend,
            registry,
            surfaces: RefCell::new(HashMap::new()),
            queues: RequestQueues::default(),
            current: RefCell::new(None),
            switch_generation: Cell::new(0),
            window: Cell::new(window),
            chrome,
            modal_open: Cell::new(false),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn bus(&self) -> &EventBus {
        self.registry.bus()
    }

    /// The app whose surface is selected for display.
    pub fn current(&self) -> Option<AppId> {
        self.current.borrow().clone()
    }

    pub fn has_surface(&self, id: &AppId) -> bool {
        self.surfaces.borrow().contains_key(id)
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.borrow().len()
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open.get()
    }

    /// Bounds of the app surface for a workspace's dock layout.
    pub fn bounds_for(&self, workspace: &WorkspaceId) -> Result<Rect> {
        let ws = self.registry.get_workspace(workspace)?;
        Ok(compute_bounds(
            self.window.get(),
            ws.layout.dock_position,
            ws.layout.dock_size,
            self.chrome,
        ))
    }

    /// Build a surface for `app` and mark it background-loaded. The stored
    /// zoom is applied and the badge count kept.
    async fn create_surface(&self, app: &AppInstance) -> Result<()> {
        let request = SurfaceRequest {
            app_id: app.id.clone(),
            url: app.url.clone(),
            partition: app.partition_key.clone(),
            zoom_level: app.state.zoom_level,
            bounds: self.bounds_for(&app.workspace_id)?,
        };

        let surface = match self.backend.create(&request).await {
            Ok(surface) => surface,
            Err(e) => {
                warn!(app_id = %app.id, error = %e, "surface creation failed");
                return Err(e.into());
            }
        };
        self.surfaces.borrow_mut().insert(app.id.clone(), surface);

        self.update_state(&app.id, |state| {
            if state.status == AppStatus::Hibernated {
                state.status = AppStatus::BackgroundLoaded;
            }
        })?;
        Ok(())
    }

    /// Take an app's surface out of the pool and destroy it.
    async fn release_surface(&self, id: &AppId, partition: &PartitionKey) -> bool {
        let surface = self.surfaces.borrow_mut().remove(id);
        let Some(surface) = surface else {
            return false;
        };
        self.backend.destroy(surface).await;
        self.release_partition_if_unused(partition);
        true
    }

    fn release_partition_if_unused(&self, partition: &PartitionKey) {
        let surfaces = self.surfaces.borrow();
        let in_use = self
            .registry
            .list_apps(None)
            .iter()
            .any(|app| &app.partition_key == partition && surfaces.contains_key(&app.id));
        if !in_use {
            self.backend.release_partition(partition);
        }
    }

    /// Read-modify-write an app's runtime state through the registry.
    fn update_state(&self, id: &AppId, f: impl FnOnce(&mut AppState)) -> Result<AppInstance> {
        let app = self.registry.get_app(id)?;
        let mut state = app.state.clone();
        f(&mut state);
        self.registry.apply_runtime_state(id, state)
    }

    /// Apply the current visibility decision to every surface. Hides run
    /// before the show so two surfaces are never visible together.
    fn apply_plan(&self) {
        let current = self.current.borrow().clone();
        let plan = apply_visibility(current.as_ref(), self.modal_open.get());
        let surfaces = self.surfaces.borrow();

        for (id, surface) in surfaces.iter() {
            if !plan.shows(id) {
                if let Err(e) = surface.set_visible(false) {
                    warn!(app_id = %id, error = %e, "failed to hide surface");
                }
            }
        }

        if let VisibilityPlan::Show(id) = &plan {
            let Some(surface) = surfaces.get(id) else {
                return;
            };
            let bounds = self
                .registry
                .get_app(id)
                .and_then(|app| self.bounds_for(&app.workspace_id));
            match bounds {
                Ok(bounds) => {
                    if let Err(e) = surface.set_bounds(bounds) {
                        warn!(app_id = %id, error = %e, "failed to position surface");
                    }
                }
                Err(e) => warn!(app_id = %id, error = %e, "no bounds for surface"),
            }
            if let Err(e) = surface.set_visible(true) {
                warn!(app_id = %id, error = %e, "failed to show surface");
            }
            debug!(app_id = %id, "surface shown");
        }
    }
}
