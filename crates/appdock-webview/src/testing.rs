//! In-memory surface backend for tests.
//!
//! Models a cookie jar per partition, tracks every surface's visibility,
//! bounds, zoom and load count, and can delay or fail surface creation.

use appdock_common::{AppId, Rect};
use appdock_registry::PartitionKey;
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::time::Duration;

use crate::surface::{Surface, SurfaceBackend, SurfaceError, SurfaceRequest};

/// Observable state of one fake surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceRecord {
    pub url: String,
    pub partition: PartitionKey,
    pub visible: bool,
    pub bounds: Rect,
    pub zoom: f64,
    /// Initial load plus every reload or navigation.
    pub loads: u32,
}

#[derive(Default)]
struct FakeState {
    surfaces: HashMap<AppId, SurfaceRecord>,
    jars: HashMap<PartitionKey, HashMap<String, String>>,
    released: Vec<PartitionKey>,
    delays: HashMap<AppId, Duration>,
    failing: HashSet<AppId>,
    failing_urls: HashSet<String>,
    clear_failures: u32,
    created: u32,
    destroyed: u32,
}

#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Rc<RefCell<FakeState>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay surface creation for `id` by `delay`.
    pub fn delay_creation(&self, id: &AppId, delay: Duration) {
        self.state.borrow_mut().delays.insert(id.clone(), delay);
    }

    /// Make surface creation for `id` fail until [`allow_creation`](Self::allow_creation).
    pub fn fail_creation(&self, id: &AppId) {
        self.state.borrow_mut().failing.insert(id.clone());
    }

    pub fn allow_creation(&self, id: &AppId) {
        self.state.borrow_mut().failing.remove(id);
    }

    /// Make surface creation fail for any app pointing at `url`.
    pub fn fail_url(&self, url: &str) {
        self.state.borrow_mut().failing_urls.insert(url.to_string());
    }

    /// Make the next `count` partition clears fail.
    pub fn fail_next_clears(&self, count: u32) {
        self.state.borrow_mut().clear_failures = count;
    }

    pub fn set_cookie(&self, partition: &PartitionKey, name: &str, value: &str) {
        self.state
            .borrow_mut()
            .jars
            .entry(partition.clone())
            .or_default()
            .insert(name.to_string(), value.to_string());
    }

    pub fn cookie(&self, partition: &PartitionKey, name: &str) -> Option<String> {
        self.state
            .borrow()
            .jars
            .get(partition)
            .and_then(|jar| jar.get(name).cloned())
    }

    pub fn surface(&self, id: &AppId) -> Option<SurfaceRecord> {
        self.state.borrow().surfaces.get(id).cloned()
    }

    pub fn visible_apps(&self) -> Vec<AppId> {
        let mut visible: Vec<AppId> = self
            .state
            .borrow()
            .surfaces
            .iter()
            .filter(|(_, record)| record.visible)
            .map(|(id, _)| id.clone())
            .collect();
        visible.sort();
        visible
    }

    pub fn released_partitions(&self) -> Vec<PartitionKey> {
        self.state.borrow().released.clone()
    }

    pub fn created_count(&self) -> u32 {
        self.state.borrow().created
    }

    pub fn destroyed_count(&self) -> u32 {
        self.state.borrow().destroyed
    }
}

pub struct FakeSurface {
    app_id: AppId,
    state: Rc<RefCell<FakeState>>,
}

impl FakeSurface {
    fn with_record(&self, f: impl FnOnce(&mut SurfaceRecord)) -> Result<(), SurfaceError> {
        let mut state = self.state.borrow_mut();
        let record = state
            .surfaces
            .get_mut(&self.app_id)
            .ok_or_else(|| SurfaceError::Operation(format!("surface {} is gone", self.app_id)))?;
        f(record);
        Ok(())
    }
}

impl Surface for FakeSurface {
    fn set_bounds(&self, bounds: Rect) -> Result<(), SurfaceError> {
        self.with_record(|r| r.bounds = bounds)
    }

    fn set_visible(&self, visible: bool) -> Result<(), SurfaceError> {
        self.with_record(|r| r.visible = visible)
    }

    fn set_zoom(&self, level: f64) -> Result<(), SurfaceError> {
        self.with_record(|r| r.zoom = level)
    }

    fn load_url(&self, url: &str) -> Result<(), SurfaceError> {
        self.with_record(|r| {
            r.url = url.to_string();
            r.loads += 1;
        })
    }

    fn reload(&self) -> Result<(), SurfaceError> {
        self.with_record(|r| r.loads += 1)
    }
}

#[async_trait(?Send)]
impl SurfaceBackend for FakeBackend {
    type Surface = FakeSurface;

    async fn create(&self, request: &SurfaceRequest) -> Result<FakeSurface, SurfaceError> {
        let delay = self.state.borrow().delays.get(&request.app_id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.borrow_mut();
        if state.failing.contains(&request.app_id) || state.failing_urls.contains(&request.url) {
            return Err(SurfaceError::Build(format!("cannot load {}", request.url)));
        }
        state.created += 1;
        state.surfaces.insert(
            request.app_id.clone(),
            SurfaceRecord {
                url: request.url.clone(),
                partition: request.partition.clone(),
                visible: false,
                bounds: request.bounds,
                zoom: request.zoom_level,
                loads: 1,
            },
        );
        Ok(FakeSurface {
            app_id: request.app_id.clone(),
            state: Rc::clone(&self.state),
        })
    }

    async fn destroy(&self, surface: FakeSurface) {
        let mut state = self.state.borrow_mut();
        state.surfaces.remove(&surface.app_id);
        state.destroyed += 1;
    }

    fn clear_partition(
        &self,
        partition: &PartitionKey,
        _live: &[&FakeSurface],
    ) -> Result<(), SurfaceError> {
        let mut state = self.state.borrow_mut();
        if state.clear_failures > 0 {
            state.clear_failures -= 1;
            return Err(SurfaceError::Clear(format!("{partition} is locked")));
        }
        state.jars.remove(partition);
        Ok(())
    }

    fn release_partition(&self, partition: &PartitionKey) {
        self.state.borrow_mut().released.push(partition.clone());
    }
}
