//! Scoped callback registration.
//!
//! The lock screen listens on three callback channels of the update monitor.
//! [`Subscriptions`] acquires all three at once and releases them together,
//! either explicitly or when dropped, so no callback can outlive the lock
//! screen it targets.

use std::{fmt, sync::Arc};

/// Callback channel offered by the update monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    /// SIM state changes.
    SimState,
    /// Battery, carrier, time and ringer updates.
    Info,
    /// Orientation and keyboard changes.
    Configuration,
}

impl Channel {
    /// Every channel the lock screen listens on.
    pub const ALL: [Channel; 3] = [Channel::SimState, Channel::Info, Channel::Configuration];
}

/// Registration handle returned by the update monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Source of device callbacks.
///
/// Events are only delivered on channels with a live subscription.
pub trait UpdateMonitor: Send + Sync {
    /// Start delivering events for `channel`.
    fn subscribe(&self, channel: Channel) -> SubscriptionId;

    /// Stop delivering events for this registration. Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}

/// Live registrations on every [`Channel`], released together.
pub struct Subscriptions {
    monitor: Arc<dyn UpdateMonitor>,
    ids: Vec<(Channel, SubscriptionId)>,
}

impl Subscriptions {
    /// Subscribe to every channel.
    pub fn acquire(monitor: Arc<dyn UpdateMonitor>) -> Self {
        let ids =
            Channel::ALL.into_iter().map(|channel| (channel, monitor.subscribe(channel))).collect();
        tracing::debug!(?ids, "subscribed to update monitor");
        Self { monitor, ids }
    }

    /// Unsubscribe from every channel. Idempotent.
    pub fn release(&mut self) {
        for (channel, id) in self.ids.drain(..) {
            tracing::debug!(?channel, ?id, "unsubscribing");
            self.monitor.unsubscribe(id);
        }
    }

    /// Whether the registrations are still live.
    pub fn is_active(&self) -> bool {
        !self.ids.is_empty()
    }
}

impl fmt::Debug for Subscriptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriptions").field("ids", &self.ids).finish_non_exhaustive()
    }
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        self.release();
    }
}
