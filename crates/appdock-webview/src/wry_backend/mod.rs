//! `wry`-backed surfaces.
//!
//! Each partition key maps to one `WebContext` whose data directory lives
//! under `<data_root>/partitions/`. Apps sharing a key share cookies and
//! storage; apps with distinct keys are isolated.

mod handlers;
mod shell;
mod surface;

pub use handlers::rect_to_wry;
pub use shell::{ShellOptions, ShellView};
pub use surface::WrySurface;

use appdock_registry::PartitionKey;
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};
use wry::raw_window_handle::HasWindowHandle;
use wry::{WebContext, WebViewBuilder};

use crate::events::{EventQueue, SurfaceLabel};
use crate::surface::{Surface, SurfaceBackend, SurfaceError, SurfaceRequest};

pub struct WryBackend<W> {
    window: Arc<W>,
    data_root: PathBuf,
    contexts: RefCell<HashMap<PartitionKey, WebContext>>,
    events: EventQueue,
    devtools: bool,
}

impl<W: HasWindowHandle> WryBackend<W> {
    pub fn new(window: Arc<W>, data_root: impl Into<PathBuf>, events: EventQueue) -> Self {
        Self {
            window,
            data_root: data_root.into(),
            contexts: RefCell::new(HashMap::new()),
            events,
            devtools: cfg!(debug_assertions),
        }
    }

    pub fn partition_dir(&self, partition: &PartitionKey) -> PathBuf {
        partition_dir(&self.data_root, partition)
    }
}

/// On-disk directory for a partition's cookies and storage.
pub fn partition_dir(data_root: &Path, partition: &PartitionKey) -> PathBuf {
    let name: String = partition
        .scope()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    data_root.join("partitions").join(name)
}

#[async_trait(?Send)]
impl<W: HasWindowHandle> SurfaceBackend for WryBackend<W> {
    type Surface = WrySurface;

    async fn create(&self, request: &SurfaceRequest) -> Result<WrySurface, SurfaceError> {
        let label = SurfaceLabel::App(request.app_id.clone());
        let mut contexts = self.contexts.borrow_mut();
        let context = contexts
            .entry(request.partition.clone())
            .or_insert_with(|| WebContext::new(Some(self.partition_dir(&request.partition))));

        let mut builder = WebViewBuilder::with_web_context(context)
            .with_url(&request.url)
            .with_bounds(rect_to_wry(request.bounds))
            .with_visible(false)
            .with_focused(false)
            .with_devtools(self.devtools);

        builder = handlers::attach_page_load_handler(builder, self.events.clone(), label.clone());
        builder = handlers::attach_title_handler(builder, self.events.clone(), label.clone());
        builder = handlers::attach_app_navigation_handler(builder, self.events.clone(), label);

        let webview = builder
            .build_as_child(&*self.window)
            .map_err(|e| SurfaceError::Build(e.to_string()))?;

        let surface = WrySurface::new(webview, request.app_id.clone());
        surface.set_zoom(request.zoom_level)?;

        info!(
            app_id = %request.app_id,
            partition = %request.partition,
            url = %request.url,
            "surface created"
        );
        Ok(surface)
    }

    async fn destroy(&self, surface: WrySurface) {
        debug!(app_id = %surface.app_id(), "surface destroyed");
        drop(surface);
    }

    fn clear_partition(
        &self,
        partition: &PartitionKey,
        live: &[&WrySurface],
    ) -> Result<(), SurfaceError> {
        // Every live surface on the partition shares one data store, so
        // clearing through any of them wipes it for all.
        if let Some(surface) = live.first() {
            return surface.clear_browsing_data();
        }

        let dir = self.partition_dir(partition);
        if dir.exists() {
            std::fs::remove_dir_all(&dir)
                .map_err(|e| SurfaceError::Clear(format!("{}: {e}", dir.display())))?;
        }
        info!(partition = %partition, "partition data removed");
        Ok(())
    }

    fn release_partition(&self, partition: &PartitionKey) {
        if self.contexts.borrow_mut().remove(partition).is_some() {
            debug!(partition = %partition, "partition context released");
        } else {
            warn!(partition = %partition, "released unknown partition");
        }
    }
}
