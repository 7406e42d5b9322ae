//! Per-channel push subscriptions held on behalf of the shell.

use appdock_common::{ChannelSubscription, DockError, EventBus, Result};
use std::collections::BTreeMap;
use tracing::debug;

use super::protocol::PushMessage;

pub struct Subscriptions {
    bus: EventBus,
    active: BTreeMap<&'static str, ChannelSubscription>,
}

impl Subscriptions {
    pub fn new(bus: EventBus) -> Self {
        Self {
            bus,
            active: BTreeMap::new(),
        }
    }

    /// Start delivering a channel. Returns `false` if it was already
    /// subscribed. Unknown channels are a validation error.
    pub fn subscribe(&mut self, channel: &str) -> Result<bool> {
        let sub = self
            .bus
            .subscribe_channel(channel)
            .ok_or_else(|| DockError::validation(format!("unknown channel: {channel}")))?;
        if self.active.contains_key(sub.channel()) {
            return Ok(false);
        }
        debug!(channel = sub.channel(), "channel subscribed");
        self.active.insert(sub.channel(), sub);
        Ok(true)
    }

    /// Stop delivering a channel. Events not yet drained are dropped.
    pub fn unsubscribe(&mut self, channel: &str) -> bool {
        let removed = self.active.remove(channel).is_some();
        if removed {
            debug!(channel, "channel unsubscribed");
        }
        removed
    }

    pub fn is_subscribed(&self, channel: &str) -> bool {
        self.active.contains_key(channel)
    }

    /// Every pending event on subscribed channels, without blocking.
    pub fn drain(&mut self) -> Vec<PushMessage> {
        let mut messages = Vec::new();
        for sub in self.active.values_mut() {
            while let Some(event) = sub.try_recv() {
                messages.push(PushMessage::new(event));
            }
        }
        messages
    }
}
