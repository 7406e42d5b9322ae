//! AppDockApp struct definition and constructor.

use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::runtime::Runtime;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use winit::window::Window;

use appdock_config::AppDockConfig;
use appdock_registry::Registry;
use appdock_webview::{EventQueue, ShellView, SweepSchedule, ViewLifecycleManager, WryBackend};

use crate::bridge::CommandBridge;

pub(super) type Backend = WryBackend<Window>;

/// Paths and overrides resolved from the command line.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub data_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub dev_url: Option<String>,
}

/// Top-level application state.
pub struct AppDockApp {
    pub(super) config: AppDockConfig,
    pub(super) options: LaunchOptions,
    pub(super) config_rx: Option<watch::Receiver<AppDockConfig>>,
    pub(super) tokio_runtime: Option<Runtime>,

    // Persistence
    pub(super) registry: Option<Arc<Registry>>,
    pub(super) flusher: Option<JoinHandle<()>>,

    // Windowing
    pub(super) window: Option<Arc<Window>>,
    pub(super) shell: Option<ShellView>,

    // App surfaces and the shell bridge
    pub(super) lifecycle: Option<Rc<ViewLifecycleManager<Backend>>>,
    pub(super) bridge: Option<CommandBridge<Backend>>,
    pub(super) webview_events: EventQueue,

    pub(super) sweep: SweepSchedule,
    pub(super) should_exit: bool,
    pub(super) last_poll: Instant,
}

impl AppDockApp {
    pub fn new(
        config: AppDockConfig,
        options: LaunchOptions,
        runtime: Runtime,
        config_rx: watch::Receiver<AppDockConfig>,
    ) -> Self {
        let now = Instant::now();
        let sweep = SweepSchedule::new(
            Duration::from_secs(config.hibernation.sweep_interval_secs),
            now,
        );
        Self {
            config,
            options,
            config_rx: Some(config_rx),
            tokio_runtime: Some(runtime),
            registry: None,
            flusher: None,
            window: None,
            shell: None,
            lifecycle: None,
            bridge: None,
            webview_events: EventQueue::new(),
            sweep,
            should_exit: false,
            last_poll: now,
        }
    }
}
