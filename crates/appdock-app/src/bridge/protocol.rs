//! Wire format of the command/event bridge.
//!
//! Requests arrive as `{"id": 7, "op": "app.switch", "args": {...}}`.
//! Replies are `{"id": 7, "ok": true, "data": ...}` or
//! `{"id": 7, "ok": false, "error": {"kind": ..., "message": ...}}`.
//! Push events are `{"channel": ..., "event": ...}`.

use appdock_common::{AppId, DockError, Event, ProfileId, WorkspaceId};
use appdock_registry::{AppPatch, NewApp, NewProfile, NewWorkspace, ProfilePatch, WorkspacePatch};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Every operation the shell may request. Unknown ops and malformed
/// arguments are rejected before anything runs.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", content = "args")]
pub enum Command {
    #[serde(rename = "profile.get")]
    ProfileGet { id: ProfileId },
    #[serde(rename = "profile.list")]
    ProfileList {},
    #[serde(rename = "profile.create")]
    ProfileCreate(NewProfile),
    #[serde(rename = "profile.update")]
    ProfileUpdate {
        id: ProfileId,
        #[serde(flatten)]
        patch: ProfilePatch,
    },
    #[serde(rename = "profile.delete")]
    ProfileDelete { id: ProfileId },
    #[serde(rename = "profile.switch")]
    ProfileSwitch { id: ProfileId },

    #[serde(rename = "workspace.list")]
    WorkspaceList {
        #[serde(default, rename = "profileId")]
        profile_id: Option<ProfileId>,
    },
    #[serde(rename = "workspace.create")]
    WorkspaceCreate(NewWorkspace),
    #[serde(rename = "workspace.update")]
    WorkspaceUpdate {
        id: WorkspaceId,
        #[serde(flatten)]
        patch: WorkspacePatch,
    },
    #[serde(rename = "workspace.delete")]
    WorkspaceDelete { id: WorkspaceId },
    #[serde(rename = "workspace.switch")]
    WorkspaceSwitch { id: WorkspaceId },

    #[serde(rename = "app.list")]
    AppList {
        #[serde(default, rename = "workspaceId")]
        workspace_id: Option<WorkspaceId>,
    },
    #[serde(rename = "app.create")]
    AppCreate(NewApp),
    #[serde(rename = "app.update")]
    AppUpdate {
        id: AppId,
        #[serde(flatten)]
        patch: AppPatch,
    },
    #[serde(rename = "app.delete")]
    AppDelete { id: AppId },
    #[serde(rename = "app.switch")]
    AppSwitch { id: AppId },
    #[serde(rename = "app.hibernate")]
    AppHibernate { id: AppId },
    #[serde(rename = "app.wake")]
    AppWake { id: AppId },
    #[serde(rename = "app.clearSession")]
    AppClearSession { id: AppId },
    #[serde(rename = "app.reload")]
    AppReload { id: AppId },
    #[serde(rename = "app.setZoom")]
    AppSetZoom { id: AppId, level: f64 },

    #[serde(rename = "view.setModal")]
    ViewSetModal { open: bool },
    #[serde(rename = "view.refresh")]
    ViewRefresh {},

    #[serde(rename = "state.snapshot")]
    StateSnapshot {},

    #[serde(rename = "events.subscribe")]
    EventsSubscribe { channel: String },
    #[serde(rename = "events.unsubscribe")]
    EventsUnsubscribe { channel: String },
}

impl Command {
    /// Operation name as it appears on the wire.
    pub fn op(&self) -> &'static str {
        match self {
            Self::ProfileGet { .. } => "profile.get",
            Self::ProfileList {} => "profile.list",
            Self::ProfileCreate(_) => "profile.create",
            Self::ProfileUpdate { .. } => "profile.update",
            Self::ProfileDelete { .. } => "profile.delete",
            Self::ProfileSwitch { .. } => "profile.switch",
            Self::WorkspaceList { .. } => "workspace.list",
            Self::WorkspaceCreate(_) => "workspace.create",
            Self::WorkspaceUpdate { .. } => "workspace.update",
            Self::WorkspaceDelete { .. } => "workspace.delete",
            Self::WorkspaceSwitch { .. } => "workspace.switch",
            Self::AppList { .. } => "app.list",
            Self::AppCreate(_) => "app.create",
            Self::AppUpdate { .. } => "app.update",
            Self::AppDelete { .. } => "app.delete",
            Self::AppSwitch { .. } => "app.switch",
            Self::AppHibernate { .. } => "app.hibernate",
            Self::AppWake { .. } => "app.wake",
            Self::AppClearSession { .. } => "app.clearSession",
            Self::AppReload { .. } => "app.reload",
            Self::AppSetZoom { .. } => "app.setZoom",
            Self::ViewSetModal { .. } => "view.setModal",
            Self::ViewRefresh {} => "view.refresh",
            Self::StateSnapshot {} => "state.snapshot",
            Self::EventsSubscribe { .. } => "events.subscribe",
            Self::EventsUnsubscribe { .. } => "events.unsubscribe",
        }
    }
}

/// A parsed request: correlation id plus command.
#[derive(Debug, Clone)]
pub struct Request {
    pub id: u64,
    pub command: Command,
}

#[derive(Deserialize)]
struct RawRequest {
    id: u64,
    op: String,
    #[serde(default)]
    args: Value,
}

/// Why a raw message could not become a [`Request`]. Carries the id when
/// one could be read so the failure can still be answered.
#[derive(Debug)]
pub struct ParseFailure {
    pub id: Option<u64>,
    pub message: String,
}

impl Request {
    pub fn parse(body: &str) -> Result<Self, ParseFailure> {
        let raw: RawRequest = serde_json::from_str(body).map_err(|e| ParseFailure {
            id: None,
            message: format!("malformed request: {e}"),
        })?;

        // No-argument ops are struct variants, so absent args become `{}`.
        let args = match raw.args {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };
        let tagged = serde_json::json!({ "op": raw.op, "args": args });
        let command = serde_json::from_value(tagged).map_err(|e| ParseFailure {
            id: Some(raw.id),
            message: format!("invalid {} request: {e}", raw.op),
        })?;

        Ok(Self {
            id: raw.id,
            command,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub id: u64,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl Response {
    pub fn success(id: u64, data: Value) -> Self {
        Self {
            id,
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(id: u64, error: &DockError) -> Self {
        Self::error(id, error.kind(), error.to_string())
    }

    pub fn error(id: u64, kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id,
            ok: false,
            data: None,
            error: Some(ErrorBody {
                kind: kind.into(),
                message: message.into(),
            }),
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// An event pushed to a subscribed channel.
#[derive(Debug, Clone, Serialize)]
pub struct PushMessage {
    pub channel: &'static str,
    pub event: Event,
}

impl PushMessage {
    pub fn new(event: Event) -> Self {
        Self {
            channel: event.channel(),
            event,
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
