//! Graceful shutdown: destroy surfaces, flush the store, stop the runtime.

use std::time::Duration;

use super::core::AppDockApp;

impl AppDockApp {
    /// Perform graceful shutdown of all subsystems.
    ///
    /// Order matters:
    /// 1. Destroy app surfaces
    /// 2. Drop the bridge and the shell webview
    /// 3. Flush the registry (final write attempt)
    /// 4. Shut down the tokio runtime
    pub(super) fn shutdown(&mut self) {
        tracing::info!("Initiating graceful shutdown");

        self.bridge = None;
        if let Some(lifecycle) = self.lifecycle.take() {
            pollster::block_on(lifecycle.shutdown());
        }
        self.shell = None;

        if let Some(registry) = self.registry.take() {
            if self.tokio_runtime.is_some() {
                pollster::block_on(registry.shutdown());
            }
        }
        self.flusher = None;
        self.config_rx = None;

        if let Some(rt) = self.tokio_runtime.take() {
            rt.shutdown_timeout(Duration::from_secs(2));
        }

        self.window = None;
        self.should_exit = true;
        tracing::info!("Graceful shutdown complete");
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use appdock_config::AppDockConfig;

    use crate::app_state::core::AppDockApp;
    use crate::app_state::LaunchOptions;

    fn app(data_dir: PathBuf) -> AppDockApp {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let (_tx, rx) = tokio::sync::watch::channel(AppDockConfig::default());
        let options = LaunchOptions {
            data_dir,
            assets_dir: PathBuf::from("assets"),
            dev_url: None,
        };
        AppDockApp::new(AppDockConfig::default(), options, runtime, rx)
    }

    #[test]
    fn shutdown_on_fresh_app_does_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path().to_path_buf());

        app.shutdown();

        assert!(app.tokio_runtime.is_none());
        assert!(app.lifecycle.is_none());
        assert!(app.registry.is_none());
        assert!(app.should_exit);
    }

    #[test]
    fn shutdown_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path().to_path_buf());

        app.shutdown();
        app.shutdown();

        assert!(app.window.is_none());
    }

    #[test]
    fn shutdown_flushes_seeded_registry() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path().to_path_buf());
        assert!(app.initialize_registry());

        app.shutdown();

        let raw = std::fs::read_to_string(dir.path().join("store.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["profiles"][0]["name"], "Default");
    }
}
