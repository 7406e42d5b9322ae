//! Canonical state for profiles, workspaces, and app instances.
//!
//! The [`Registry`] owns the in-memory copy and is the only writer.
//! Every mutation is published on the [`EventBus`](appdock_common::EventBus)
//! and handed to a background flusher that persists it to a [`KvStore`].

pub mod model;
pub mod partition;
pub mod registry;
pub mod store;
pub mod validation;

pub use model::{
    AppInstance, AppPatch, AppState, HibernationPolicy, Layout, NewApp, NewProfile, NewWorkspace,
    Profile, ProfilePatch, Workspace, WorkspacePatch,
};
pub use partition::{resolve_partition, PartitionKey};
pub use registry::{Registry, RegistrySettings, Snapshot};
pub use store::{
    spawn_flusher, FlushHandle, JsonFileStore, KvStore, MemoryStore, PersistedState, RetryPolicy,
};
