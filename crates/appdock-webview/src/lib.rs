//! Native web surfaces for AppDock.
//!
//! Provides:
//! - A [`SurfaceBackend`] abstraction over native web views, with a
//!   `wry` implementation that gives each partition its own storage
//! - The [`ViewLifecycleManager`] that creates, switches, hibernates,
//!   and destroys one surface per app
//! - Pure bounds and visibility decisions for the visible surface
//! - The UI shell webview with IPC and the `appdock://` content protocol

pub mod badge;
pub mod bounds;
pub mod content;
pub mod events;
pub mod ipc;
pub mod lifecycle;
pub mod navigation;
pub mod surface;
pub mod wry_backend;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use bounds::{apply_visibility, compute_bounds, ChromeInsets, VisibilityPlan};
pub use content::{Asset, ContentProvider};
pub use events::{EventQueue, PageLoadState, SurfaceLabel, WebViewEvent};
pub use lifecycle::{SweepSchedule, SwitchOutcome, ViewLifecycleManager};
pub use surface::{Surface, SurfaceBackend, SurfaceError, SurfaceRequest};
pub use wry_backend::{ShellOptions, ShellView, WryBackend};
