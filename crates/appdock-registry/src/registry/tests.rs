//! Tests for the entity registry.

use super::*;
use crate::model::{AppPatch, AppState, NewApp, NewProfile, NewWorkspace, WorkspacePatch};
use crate::store::{spawn_flusher, KvStore, MemoryStore, RetryPolicy};
use appdock_common::{AppId, DockError, SessionMode};
use chrono::{Duration, Utc};
use std::sync::Arc;

fn registry() -> Registry {
    Registry::load(
        PersistedState::default(),
        RegistrySettings::default(),
        EventBus::default(),
        FlushHandle::detached(),
    )
}

fn home(registry: &Registry) -> WorkspaceId {
    registry.current_workspace().unwrap()
}

fn add_app(registry: &Registry, ws: &WorkspaceId, name: &str) -> AppInstance {
    registry
        .create_app(NewApp {
            workspace_id: ws.clone(),
            name: name.into(),
            url: format!("https://{}.example.com", name.to_lowercase()),
            icon: None,
        })
        .unwrap()
}

fn add_workspace(registry: &Registry, name: &str, mode: SessionMode) -> Workspace {
    registry
        .create_workspace(NewWorkspace {
            profile_id: registry.current_profile().unwrap(),
            name: name.into(),
            session_mode: mode,
            ..Default::default()
        })
        .unwrap()
}

#[test]
fn first_launch_seeds_default_profile_and_workspace() {
    let registry = registry();
    let snap = registry.snapshot();

    assert_eq!(snap.profiles.len(), 1);
    assert_eq!(snap.profiles[0].name, DEFAULT_PROFILE_NAME);
    assert_eq!(snap.workspaces.len(), 1);
    assert_eq!(snap.workspaces[0].name, DEFAULT_WORKSPACE_NAME);
    assert_eq!(snap.current_profile.as_ref(), Some(&snap.profiles[0].id));
    assert_eq!(snap.current_workspace.as_ref(), Some(&snap.workspaces[0].id));
    assert_eq!(snap.workspaces[0].layout.dock_size, 64);
}

#[test]
fn load_normalizes_status_and_drops_orphans() {
    let seeded = registry();
    let ws = home(&seeded);
    let app = add_app(&seeded, &ws, "Mail");
    let mut active = app.state.clone();
    active.status = AppStatus::Active;
    seeded.apply_runtime_state(&app.id, active).unwrap();

    let mut persisted = seeded.read().persisted();
    let mut orphan = app.clone();
    orphan.id = AppId::from("orphan");
    orphan.workspace_id = WorkspaceId::from("missing");
    persisted.apps.push(orphan);

    let reloaded = Registry::load(
        persisted,
        RegistrySettings::default(),
        EventBus::default(),
        FlushHandle::detached(),
    );
    let apps = reloaded.list_apps(None);
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0].state.status, AppStatus::Hibernated);
    assert_eq!(reloaded.current_workspace(), Some(ws));
}

#[test]
fn isolated_apps_get_distinct_partitions() {
    let registry = registry();
    let ws = home(&registry);
    let a = add_app(&registry, &ws, "A");
    let b = add_app(&registry, &ws, "B");

    assert_eq!(a.partition_key.as_str(), format!("persist:{}", a.id));
    assert_ne!(a.partition_key, b.partition_key);
}

#[test]
fn shared_apps_share_workspace_partition() {
    let registry = registry();
    let ws = add_workspace(&registry, "Work", SessionMode::Shared);
    let a = add_app(&registry, &ws.id, "A");
    let b = add_app(&registry, &ws.id, "B");

    assert_eq!(a.partition_key.as_str(), format!("persist:{}", ws.id));
    assert_eq!(a.partition_key, b.partition_key);
}

#[test]
fn session_mode_change_only_affects_new_apps() {
    let registry = registry();
    let ws = home(&registry);
    let before = add_app(&registry, &ws, "Before");

    registry
        .update_workspace(
            &ws,
            WorkspacePatch {
                session_mode: Some(SessionMode::Shared),
                ..Default::default()
            },
        )
        .unwrap();
    let after = add_app(&registry, &ws, "After");

    let before_now = registry.get_app(&before.id).unwrap();
    assert_eq!(before_now.partition_key, before.partition_key);
    assert_eq!(after.partition_key.as_str(), format!("persist:{ws}"));
}

#[test]
fn create_app_in_missing_workspace_is_not_found() {
    let registry = registry();
    let err = registry
        .create_app(NewApp {
            workspace_id: WorkspaceId::from("nope"),
            name: "Mail".into(),
            url: "https://mail.example.com".into(),
            icon: None,
        })
        .unwrap_err();

    assert!(matches!(err, DockError::NotFound { .. }));
    assert!(registry.list_apps(None).is_empty());
}

#[test]
fn create_app_rejects_bad_url_without_mutation() {
    let registry = registry();
    let ws = home(&registry);
    let err = registry
        .create_app(NewApp {
            workspace_id: ws,
            name: "Bad".into(),
            url: "ftp://files.example.com".into(),
            icon: None,
        })
        .unwrap_err();

    assert_eq!(err.kind(), "validation_error");
    assert!(registry.list_apps(None).is_empty());
}

#[test]
fn update_app_never_changes_status() {
    let registry = registry();
    let ws = home(&registry);
    let app = add_app(&registry, &ws, "Mail");

    let updated = registry
        .update_app(
            &app.id,
            AppPatch {
                name: Some("Inbox".into()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.name, "Inbox");
    assert_eq!(updated.state.status, AppStatus::Hibernated);
}

#[test]
fn dock_size_outside_bounds_is_rejected() {
    let registry = registry();
    let ws = home(&registry);
    let err = registry
        .update_workspace(
            &ws,
            WorkspacePatch {
                layout: Some(Layout {
                    dock_position: DockPosition::Top,
                    dock_size: 200,
                }),
                ..Default::default()
            },
        )
        .unwrap_err();

    assert_eq!(err.kind(), "validation_error");
    assert_eq!(registry.get_workspace(&ws).unwrap().layout.dock_size, 64);
}

#[test]
fn zero_idle_minutes_is_rejected() {
    let registry = registry();
    let err = registry
        .create_workspace(NewWorkspace {
            profile_id: registry.current_profile().unwrap(),
            name: "Lazy".into(),
            hibernation: Some(HibernationPolicy {
                enabled: true,
                idle_time_minutes: 0,
            }),
            ..Default::default()
        })
        .unwrap_err();
    assert_eq!(err.kind(), "validation_error");
    assert_eq!(registry.list_workspaces(None).len(), 1);
}

#[test]
fn delete_workspace_cascades_to_apps() {
    let registry = registry();
    let work = add_workspace(&registry, "Work", SessionMode::Isolated);
    add_app(&registry, &work.id, "A");
    add_app(&registry, &work.id, "B");
    let kept = add_app(&registry, &home(&registry), "Kept");

    registry.delete_workspace(&work.id).unwrap();

    let apps = registry.list_apps(None);
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0].id, kept.id);
    assert!(registry.get_workspace(&work.id).is_err());
}

#[test]
fn delete_current_profile_cascades_and_clears_pointers() {
    let registry = registry();
    let profile = registry.current_profile().unwrap();
    let ws = home(&registry);
    add_app(&registry, &ws, "Mail");
    assert_eq!(registry.apps_in_profile(&profile).unwrap().len(), 1);

    registry.delete_profile(&profile).unwrap();

    let snap = registry.snapshot();
    assert!(snap.profiles.is_empty());
    assert!(snap.workspaces.is_empty());
    assert!(snap.apps.is_empty());
    assert_eq!(snap.current_profile, None);
    assert_eq!(snap.current_workspace, None);
}

#[test]
fn switching_workspace_follows_its_profile() {
    let registry = registry();
    let other = registry
        .create_profile(NewProfile {
            name: "Personal".into(),
        })
        .unwrap();
    let ws = registry
        .create_workspace(NewWorkspace {
            profile_id: other.id.clone(),
            name: "Fun".into(),
            ..Default::default()
        })
        .unwrap();

    registry.set_current_workspace(&ws.id).unwrap();
    assert_eq!(registry.current_profile(), Some(other.id.clone()));
    assert_eq!(registry.current_workspace(), Some(ws.id.clone()));

    let first = registry.list_profiles()[0].id.clone();
    registry.set_current_profile(&first).unwrap();
    assert_eq!(registry.current_workspace(), Some(home_of(&registry, &first)));
}

fn home_of(registry: &Registry, profile: &ProfileId) -> WorkspaceId {
    registry.list_workspaces(Some(profile))[0].id.clone()
}

#[test]
fn runtime_state_validates_zoom() {
    let registry = registry();
    let app = add_app(&registry, &home(&registry), "Mail");
    let state = AppState {
        zoom_level: 3.0,
        ..app.state.clone()
    };
    let err = registry.apply_runtime_state(&app.id, state).unwrap_err();
    assert_eq!(err.kind(), "validation_error");
    assert_eq!(registry.get_app(&app.id).unwrap().state.zoom_level, 1.0);
}

#[test]
fn most_recent_app_uses_last_active() {
    let registry = registry();
    let ws = home(&registry);
    let a = add_app(&registry, &ws, "A");
    let b = add_app(&registry, &ws, "B");

    let later = AppState {
        last_active_at: Utc::now() + Duration::minutes(5),
        ..a.state.clone()
    };
    registry.apply_runtime_state(&a.id, later).unwrap();
    assert_eq!(registry.most_recent_app(&ws), Some(a.id.clone()));

    let latest = AppState {
        last_active_at: Utc::now() + Duration::minutes(10),
        ..b.state.clone()
    };
    registry.apply_runtime_state(&b.id, latest).unwrap();
    assert_eq!(registry.most_recent_app(&ws), Some(b.id));
}

#[tokio::test]
async fn mutations_publish_events() {
    let registry = registry();
    let mut workspace_rx = registry.bus().subscribe_channel("workspace:changed").unwrap();
    let mut app_rx = registry.bus().subscribe_channel("app:state-changed").unwrap();

    let ws = add_workspace(&registry, "Work", SessionMode::Isolated);
    let app = add_app(&registry, &ws.id, "Mail");
    registry.delete_app(&app.id).unwrap();

    match workspace_rx.recv().await.unwrap() {
        Event::WorkspaceChanged {
            workspace_id,
            change,
            ..
        } => {
            assert_eq!(workspace_id, ws.id);
            assert_eq!(change, ChangeKind::Created);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert!(matches!(
        app_rx.recv().await.unwrap(),
        Event::AppStateChanged { active: false, .. }
    ));
    assert!(matches!(
        app_rx.recv().await.unwrap(),
        Event::AppRemoved { .. }
    ));
}

#[tokio::test]
async fn mutations_reach_the_store() {
    let store = Arc::new(MemoryStore::new());
    let (flush, _task) = spawn_flusher(store.clone(), RetryPolicy::default());
    let registry = Registry::load(
        PersistedState::load(store.as_ref()).unwrap(),
        RegistrySettings::default(),
        EventBus::default(),
        flush,
    );
    let app = add_app(&registry, &home(&registry), "Mail");
    registry.shutdown().await;

    let persisted = PersistedState::load(store.as_ref()).unwrap();
    assert_eq!(persisted.apps.len(), 1);
    assert_eq!(persisted.apps[0].id, app.id);
    assert_eq!(persisted.current_profile, registry.current_profile());
    assert!(store.get("currentProfile").unwrap().is_some());
}
