//! Store, window, shell, and surface setup.

use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use appdock_common::{EventBus, Rect, Size, StoreError};
use appdock_config::AppDockConfig;
use appdock_registry::{
    spawn_flusher, JsonFileStore, KvStore, PersistedState, Registry, RegistrySettings, RetryPolicy,
};
use appdock_webview::{
    ChromeInsets, ContentProvider, ShellOptions, ShellView, ViewLifecycleManager, WryBackend,
};

use crate::bridge::CommandBridge;

use super::core::AppDockApp;

/// Open the JSON store, moving an unreadable file aside.
pub(super) fn open_store(path: &Path) -> Result<(JsonFileStore, PersistedState), StoreError> {
    let opened = JsonFileStore::open(path)
        .and_then(|store| PersistedState::load(&store).map(|state| (store, state)));
    match opened {
        Ok(opened) => Ok(opened),
        Err(StoreError::Corrupt(reason)) => {
            tracing::warn!(path = %path.display(), reason = %reason, "store unreadable, starting empty");
            let store = JsonFileStore::recover(path)?;
            Ok((store, PersistedState::default()))
        }
        Err(e) => Err(e),
    }
}

/// Window inner size in logical pixels.
pub(super) fn logical_size(window: &Window) -> Size {
    let size = window.inner_size().to_logical::<f64>(window.scale_factor());
    Size::new(size.width, size.height)
}

impl AppDockApp {
    /// Load the registry and start its flusher.
    /// Returns `false` if the store could not be opened.
    pub(super) fn initialize_registry(&mut self) -> bool {
        let path = self
            .options
            .data_dir
            .join(&self.config.persistence.file_name);
        let (store, persisted) = match open_store(&path) {
            Ok(opened) => opened,
            Err(e) => {
                tracing::error!(path = %path.display(), "Failed to open store: {e}");
                return false;
            }
        };

        let store: Arc<dyn KvStore> = Arc::new(store);
        let policy = RetryPolicy::from_config(&self.config.persistence);
        let Some(runtime) = self.tokio_runtime.as_ref() else {
            return false;
        };
        let (flush, task) = {
            let _guard = runtime.enter();
            spawn_flusher(store, policy)
        };

        let registry = Registry::load(
            persisted,
            RegistrySettings::from_config(&self.config),
            EventBus::default(),
            flush,
        );
        tracing::info!(path = %path.display(), "Store opened");

        self.registry = Some(Arc::new(registry));
        self.flusher = Some(task);
        true
    }

    /// Create the window, the shell webview, and the surface manager.
    /// Returns `false` if initialization failed and the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let Some(registry) = self.registry.clone() else {
            return false;
        };

        let attrs = WindowAttributes::default()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(
                f64::from(self.config.window.width),
                f64::from(self.config.window.height),
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };
        let size = logical_size(&window);

        let shell = match ShellView::build(
            window.as_ref(),
            self.shell_options(size),
            self.webview_events.clone(),
        ) {
            Ok(shell) => shell,
            Err(e) => {
                tracing::error!("Failed to create shell webview: {e}");
                return false;
            }
        };

        let backend = WryBackend::new(
            Arc::clone(&window),
            self.options.data_dir.clone(),
            self.webview_events.clone(),
        );
        let lifecycle = Rc::new(ViewLifecycleManager::new(
            backend,
            registry,
            size,
            ChromeInsets::from_config(&self.config.chrome),
        ));

        self.bridge = Some(CommandBridge::new(Rc::clone(&lifecycle)));
        self.lifecycle = Some(lifecycle);
        self.shell = Some(shell);
        self.window = Some(window);
        tracing::info!("Window and shell initialized");
        true
    }

    fn shell_options(&self, size: Size) -> ShellOptions {
        let content = match &self.options.dev_url {
            Some(_) => None,
            None => {
                if !self.options.assets_dir.is_dir() {
                    tracing::warn!(
                        path = %self.options.assets_dir.display(),
                        "Assets directory not found, shell will have no bundled content"
                    );
                }
                Some(Arc::new(ContentProvider::new(self.options.assets_dir.clone())))
            }
        };
        ShellOptions {
            dev_url: self.options.dev_url.clone(),
            content,
            bounds: Rect::new(0.0, 0.0, size.width, size.height),
            devtools: cfg!(debug_assertions),
        }
    }

    /// Apply a reloaded config. Only the sweep interval takes effect
    /// without a restart.
    pub(super) fn apply_config(&mut self, config: AppDockConfig) {
        let interval = std::time::Duration::from_secs(config.hibernation.sweep_interval_secs);
        if interval != self.sweep.interval() {
            self.sweep.set_interval(interval, std::time::Instant::now());
            tracing::info!(secs = interval.as_secs(), "Sweep interval updated");
        }
        if config.chrome != self.config.chrome || config.persistence != self.config.persistence {
            tracing::info!("Chrome and persistence changes apply after restart");
        }
        self.config = config;
    }
}
