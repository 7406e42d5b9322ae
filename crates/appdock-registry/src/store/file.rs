//! JSON file backend. The whole map is rewritten atomically on each flush.

use appdock_common::StoreError;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

use super::KvStore;

pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<Map<String, Value>>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => Map::new(),
            Ok(raw) => match serde_json::from_str::<Value>(&raw) {
                Ok(Value::Object(map)) => map,
                Ok(_) => {
                    return Err(StoreError::Corrupt(format!(
                        "{} does not hold a JSON object",
                        path.display()
                    )))
                }
                Err(e) => {
                    return Err(StoreError::Corrupt(format!("{}: {e}", path.display())));
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(StoreError::Io(format!("{}: {e}", path.display()))),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Move an unreadable store aside and start empty.
    pub fn recover(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let backup = path.with_extension("json.corrupt");
        if path.exists() {
            std::fs::rename(&path, &backup)
                .map_err(|e| StoreError::Io(format!("{}: {e}", path.display())))?;
            warn!(backup = %backup.display(), "moved unreadable store aside");
        }
        Ok(Self {
            path,
            entries: Mutex::new(Map::new()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, entries: &Map<String, Value>) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(entries)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Io(format!("{}: {e}", parent.display())))?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &body)
            .map_err(|e| StoreError::Io(format!("{}: {e}", tmp_path.display())))?;
        std::fs::rename(&tmp_path, &self.path)
            .map_err(|e| StoreError::Io(format!("{}: {e}", self.path.display())))?;

        debug!(path = %self.path.display(), "store written");
        Ok(())
    }
}

impl KvStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set_many(&self, updates: Vec<(String, Value)>) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        for (key, value) in updates {
            entries.insert(key, value);
        }
        self.write(&entries)
    }
}
