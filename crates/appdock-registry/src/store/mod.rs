//! Persisted key-value store and the background flusher feeding it.
//!
//! The store is a flat map of JSON values under four keys. It is an
//! external collaborator; the registry never reads from it after startup.

mod file;
mod flusher;
mod memory;

pub use file::JsonFileStore;
pub use flusher::{spawn_flusher, FlushHandle, RetryPolicy};
pub use memory::MemoryStore;

use appdock_common::{ProfileId, StoreError};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::model::{AppInstance, Profile, Workspace};

pub const KEY_PROFILES: &str = "profiles";
pub const KEY_WORKSPACES: &str = "workspaces";
pub const KEY_APPS: &str = "apps";
pub const KEY_CURRENT_PROFILE: &str = "currentProfile";

/// Flat key-value persistence backend.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Write several keys as one unit.
    fn set_many(&self, entries: Vec<(String, Value)>) -> Result<(), StoreError>;

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.set_many(vec![(key.to_string(), value)])
    }
}

/// Everything the registry persists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistedState {
    pub profiles: Vec<Profile>,
    pub workspaces: Vec<Workspace>,
    pub apps: Vec<AppInstance>,
    pub current_profile: Option<ProfileId>,
}

impl PersistedState {
    /// Read all keys. Missing keys yield empty collections.
    pub fn load(store: &dyn KvStore) -> Result<Self, StoreError> {
        Ok(Self {
            profiles: read_key::<Vec<Profile>>(store, KEY_PROFILES)?.unwrap_or_default(),
            workspaces: read_key::<Vec<Workspace>>(store, KEY_WORKSPACES)?.unwrap_or_default(),
            apps: read_key::<Vec<AppInstance>>(store, KEY_APPS)?.unwrap_or_default(),
            current_profile: read_key::<Option<ProfileId>>(store, KEY_CURRENT_PROFILE)?.flatten(),
        })
    }

    pub fn entries(&self) -> Result<Vec<(String, Value)>, StoreError> {
        Ok(vec![
            (KEY_PROFILES.to_string(), to_value(&self.profiles)?),
            (KEY_WORKSPACES.to_string(), to_value(&self.workspaces)?),
            (KEY_APPS.to_string(), to_value(&self.apps)?),
            (KEY_CURRENT_PROFILE.to_string(), to_value(&self.current_profile)?),
        ])
    }
}

fn read_key<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> Result<Option<T>, StoreError> {
    match store.get(key)? {
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| StoreError::Corrupt(format!("key '{key}': {e}"))),
        None => Ok(None),
    }
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, StoreError> {
    serde_json::to_value(value).map_err(|e| StoreError::Serialize(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_empty_store_is_default() {
        let store = MemoryStore::new();
        let state = PersistedState::load(&store).unwrap();
        assert_eq!(state, PersistedState::default());
    }

    #[test]
    fn entries_use_flat_keys() {
        let state = PersistedState {
            current_profile: Some(ProfileId::from("p1")),
            ..Default::default()
        };
        let store = MemoryStore::new();
        store.set_many(state.entries().unwrap()).unwrap();

        assert_eq!(store.get(KEY_CURRENT_PROFILE).unwrap(), Some(Value::from("p1")));
        assert_eq!(store.get(KEY_APPS).unwrap(), Some(Value::Array(vec![])));
        assert_eq!(PersistedState::load(&store).unwrap(), state);
    }

    #[test]
    fn malformed_key_is_corrupt() {
        let store = MemoryStore::new();
        store.set(KEY_PROFILES, Value::from("not a list")).unwrap();
        let err = PersistedState::load(&store).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }
}
