//! Tests for the config file watcher.

use super::config_watcher::debounce;
use super::*;
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn watcher_new_with_nonexistent_path_succeeds() {
    // Watcher should be created even if the file doesn't exist yet
    let watcher = ConfigWatcher::new(PathBuf::from("/tmp/nonexistent_appdock_test.toml"));
    assert!(watcher.is_ok());
}

#[test]
fn watcher_keeps_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "# test").unwrap();

    let watcher = ConfigWatcher::new(path.clone()).unwrap();
    assert_eq!(watcher.path(), path.as_path());
}

#[tokio::test(start_paused = true)]
async fn debounce_collapses_a_burst() {
    let (tx, mut rx) = tokio::sync::mpsc::channel::<()>(16);
    tx.send(()).await.unwrap();
    tx.send(()).await.unwrap();

    let start = tokio::time::Instant::now();
    assert!(debounce(&mut rx).await);
    assert!(start.elapsed() >= Duration::from_millis(500));
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn debounce_reports_closed_channel() {
    let (tx, mut rx) = tokio::sync::mpsc::channel::<()>(16);
    drop(tx);
    assert!(!debounce(&mut rx).await);
}
