//! Tests for the reload manager.

use super::manager::{publish, read_accepted};
use super::*;
use crate::schema::AppDockConfig;
use tokio::sync::watch;
use std::path::PathBuf;

#[tokio::test]
async fn start_with_nonexistent_path_uses_defaults() {
    let path = PathBuf::from("/tmp/nonexistent_appdock_reload_test.toml");
    let (config, _rx) = ReloadManager::start(path).await;
    assert_eq!(config, AppDockConfig::default());
}

#[tokio::test]
async fn start_with_valid_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[hibernation]
sweep_interval_secs = 120
"#,
    )
    .unwrap();

    let (config, rx) = ReloadManager::start(path).await;
    assert_eq!(config.hibernation.sweep_interval_secs, 120);
    assert_eq!(config.chrome.toolbar_height, 40); // default
    assert_eq!(rx.borrow().hibernation.sweep_interval_secs, 120);
}

#[test]
fn invalid_edit_is_rejected_instead_of_defaulted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[chrome]\ndock_min = 200\ndock_max = 100\n").unwrap();

    assert!(read_accepted(&path).is_err());
    // Startup loading falls back to defaults for the same file.
    assert_eq!(
        crate::toml_loader::load_from_path(&path).unwrap(),
        AppDockConfig::default()
    );
}

#[test]
fn valid_edit_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[hibernation]\nsweep_interval_secs = 15\n").unwrap();

    let config = read_accepted(&path).unwrap();
    assert_eq!(config.hibernation.sweep_interval_secs, 15);
}

#[test]
fn unchanged_config_is_not_published() {
    let (tx, mut rx) = watch::channel(AppDockConfig::default());

    assert!(!publish(&tx, AppDockConfig::default()));
    assert!(!rx.has_changed().unwrap());

    let mut edited = AppDockConfig::default();
    edited.hibernation.sweep_interval_secs = 20;
    assert!(publish(&tx, edited));
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().hibernation.sweep_interval_secs, 20);
}
