//! Push events delivered to the UI, grouped into named channels.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;

use crate::id::{AppId, ProfileId, WorkspaceId};
use crate::notifications::Notification;
use crate::types::AppStatus;

pub const CHANNEL_APP_STATE: &str = "app:state-changed";
pub const CHANNEL_WORKSPACE: &str = "workspace:changed";
pub const CHANNEL_NOTIFICATION: &str = "notification";

/// All channel names a consumer may subscribe to.
pub const CHANNELS: &[&str] = &[CHANNEL_APP_STATE, CHANNEL_WORKSPACE, CHANNEL_NOTIFICATION];

/// What happened to a workspace or profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
    Switched,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum Event {
    #[serde(rename_all = "camelCase")]
    AppStateChanged {
        app_id: AppId,
        workspace_id: WorkspaceId,
        status: AppStatus,
        badge_count: u32,
        zoom_level: f64,
        active: bool,
    },
    #[serde(rename_all = "camelCase")]
    AppRemoved {
        app_id: AppId,
        workspace_id: WorkspaceId,
    },
    #[serde(rename_all = "camelCase")]
    WorkspaceChanged {
        workspace_id: WorkspaceId,
        profile_id: ProfileId,
        change: ChangeKind,
    },
    #[serde(rename_all = "camelCase")]
    ProfileChanged {
        profile_id: ProfileId,
        change: ChangeKind,
    },
    Notification(Notification),
}

impl Event {
    /// The channel this event is delivered on.
    pub fn channel(&self) -> &'static str {
        match self {
            Self::AppStateChanged { .. } | Self::AppRemoved { .. } => CHANNEL_APP_STATE,
            Self::WorkspaceChanged { .. } | Self::ProfileChanged { .. } => CHANNEL_WORKSPACE,
            Self::Notification(_) => CHANNEL_NOTIFICATION,
        }
    }
}

/// Fan-out bus for push events. Delivery is at-most-once: slow receivers
/// that lag behind the channel capacity lose the oldest events.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    /// Subscribe to a single named channel.
    pub fn subscribe_channel(&self, channel: &str) -> Option<ChannelSubscription> {
        let channel = CHANNELS.iter().find(|c| **c == channel)?;
        Some(ChannelSubscription {
            channel,
            receiver: self.sender.subscribe(),
        })
    }

    pub fn publish(&self, event: Event) -> usize {
        trace!(channel = event.channel(), "publishing event");
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

/// Receiver filtered to one channel. Dropping it unsubscribes.
pub struct ChannelSubscription {
    channel: &'static str,
    receiver: broadcast::Receiver<Event>,
}

impl ChannelSubscription {
    pub fn channel(&self) -> &'static str {
        self.channel
    }

    /// Wait for the next event on this channel. Returns `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<Event> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if event.channel() == self.channel => return Some(event),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    trace!(channel = self.channel, skipped, "subscriber lagged");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking variant of [`recv`](Self::recv).
    pub fn try_recv(&mut self) -> Option<Event> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if event.channel() == self.channel => return Some(event),
                Ok(_) => continue,
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn switched(ws: &str) -> Event {
        Event::WorkspaceChanged {
            workspace_id: WorkspaceId::from(ws),
            profile_id: ProfileId::from("p"),
            change: ChangeKind::Switched,
        }
    }

    fn app_event(app: &str) -> Event {
        Event::AppStateChanged {
            app_id: AppId::from(app),
            workspace_id: WorkspaceId::from("ws"),
            status: AppStatus::Active,
            badge_count: 0,
            zoom_level: 1.0,
            active: true,
        }
    }

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(switched("a"));

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, Event::WorkspaceChanged { .. }));
    }

    #[tokio::test]
    async fn multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(app_event("mail"));

        assert!(matches!(rx1.recv().await.unwrap(), Event::AppStateChanged { .. }));
        assert!(matches!(rx2.recv().await.unwrap(), Event::AppStateChanged { .. }));
    }

    #[tokio::test]
    async fn channel_subscription_filters_other_channels() {
        let bus = EventBus::new(16);
        let mut sub = bus.subscribe_channel(CHANNEL_APP_STATE).unwrap();

        bus.publish(switched("a"));
        bus.publish(Event::Notification(Notification::info("x", "y")));
        bus.publish(app_event("chat"));

        let event = sub.recv().await.unwrap();
        assert!(matches!(event, Event::AppStateChanged { ref app_id, .. } if app_id.as_str() == "chat"));
        assert!(sub.try_recv().is_none());
    }

    #[test]
    fn unknown_channel_is_rejected() {
        let bus = EventBus::new(4);
        assert!(bus.subscribe_channel("app:exploded").is_none());
        assert!(bus.subscribe_channel(CHANNEL_NOTIFICATION).is_some());
    }

    #[test]
    fn publish_returns_zero_with_no_subscribers() {
        let bus = EventBus::new(16);
        assert_eq!(bus.publish(switched("a")), 0);
    }

    #[test]
    fn events_map_to_channels() {
        assert_eq!(app_event("a").channel(), CHANNEL_APP_STATE);
        assert_eq!(switched("a").channel(), CHANNEL_WORKSPACE);
        assert_eq!(
            Event::Notification(Notification::info("a", "b")).channel(),
            CHANNEL_NOTIFICATION
        );
    }

    #[test]
    fn event_wire_shape() {
        let json = serde_json::to_value(app_event("mail")).unwrap();
        assert_eq!(json["type"], "appStateChanged");
        assert_eq!(json["data"]["appId"], "mail");
        assert_eq!(json["data"]["status"], "active");
    }
}
