//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Coordinates config, the registry, the UI shell, and the
//! app surfaces.

mod core;
mod event_handler;
mod init;
mod polling;
mod shutdown;
mod types;

pub use core::{AppDockApp, LaunchOptions};
