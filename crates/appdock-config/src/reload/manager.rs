//! Watches `config.toml` and publishes accepted edits.
//!
//! An edit is accepted when it parses and validates. Rejected edits keep
//! the running config, and edits that change nothing are not published.
//! What a new config affects is up to the receiver; the app applies the
//! hibernation sweep interval live and everything else on next launch.

use crate::schema::AppDockConfig;
use crate::toml_loader;
use crate::validation;
use crate::watcher::ConfigWatcher;
use appdock_common::ConfigError;
use std::path::{Path, PathBuf};
use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info, warn};

pub struct ReloadManager {
    config_path: PathBuf,
}

impl ReloadManager {
    /// Load the config at `config_path` and start watching it.
    ///
    /// A missing or invalid file yields defaults. The receiver sees every
    /// accepted edit after that. Must be called from within a tokio runtime.
    pub async fn start(config_path: PathBuf) -> (AppDockConfig, watch::Receiver<AppDockConfig>) {
        let initial = toml_loader::load_from_path(&config_path).unwrap_or_else(|e| {
            warn!("failed to load config: {e}, using defaults");
            AppDockConfig::default()
        });

        let (config_tx, config_rx) = watch::channel(initial.clone());
        let manager = ReloadManager { config_path };
        tokio::spawn(async move { manager.run(config_tx).await });

        (initial, config_rx)
    }

    async fn run(&self, config_tx: watch::Sender<AppDockConfig>) {
        let watcher = match ConfigWatcher::new(self.config_path.clone()) {
            Ok(w) => w,
            Err(e) => {
                error!("failed to create config watcher: {e}");
                return;
            }
        };

        let (change_tx, mut change_rx) = broadcast::channel::<()>(16);
        tokio::spawn(async move {
            if let Err(e) = watcher.watch(change_tx).await {
                error!("config watcher error: {e}");
            }
        });

        loop {
            match change_rx.recv().await {
                Ok(()) => {}
                // Coalesced: one reload covers every missed change.
                Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => {
                    info!("config watcher channel closed");
                    return;
                }
            }

            let config = match read_accepted(&self.config_path) {
                Ok(config) => config,
                Err(e) => {
                    warn!("config edit rejected, keeping running config: {e}");
                    continue;
                }
            };

            if config_tx.is_closed() {
                info!("all config receivers dropped, stopping reload manager");
                return;
            }
            publish(&config_tx, config);
        }
    }
}

/// Parse and validate the file. Unlike startup, an invalid file is an error
/// rather than a fallback to defaults.
pub(super) fn read_accepted(path: &Path) -> Result<AppDockConfig, ConfigError> {
    let config = toml_loader::parse_file(path)?;
    validation::validate(&config)?;
    Ok(config)
}

/// Replace the published config if it differs. Returns whether receivers
/// were notified.
pub(super) fn publish(config_tx: &watch::Sender<AppDockConfig>, config: AppDockConfig) -> bool {
    config_tx.send_if_modified(|current| {
        if *current == config {
            debug!("config file touched without changes");
            return false;
        }
        info!(
            sweep_interval_secs = config.hibernation.sweep_interval_secs,
            "config reloaded"
        );
        *current = config;
        true
    })
}
