pub mod errors;
pub mod events;
pub mod id;
pub mod notifications;
pub mod types;

pub use errors::{ConfigError, DockError, EntityKind, StoreError};
pub use events::{ChangeKind, ChannelSubscription, Event, EventBus};
pub use id::{new_id, AppId, ProfileId, WorkspaceId};
pub use notifications::{Notification, NotificationLevel};
pub use types::{AppStatus, DockPosition, Rect, SessionMode, Size};

pub type Result<T> = std::result::Result<T, DockError>;
