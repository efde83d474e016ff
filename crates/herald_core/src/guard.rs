//! # Owner Guard
//!
//! Ties an [`OwnerId`] to a component's lifetime: dropping the guard removes
//! every subscription made through it, so a destroyed component can never be
//! called back.

use std::sync::Arc;

use crate::bus::EventBus;
use crate::event::{Callback, Event, OwnerId};

/// RAII owner identity on a shared bus.
///
/// # Example
///
/// ```rust,ignore
/// let guard = OwnerGuard::new(Arc::clone(&bus));
/// guard.subscribe(&on_load);
/// drop(guard); // on_load is unsubscribed
/// ```
#[derive(Debug)]
pub struct OwnerGuard {
    /// Identity used for every subscription made through this guard.
    owner: OwnerId,
    /// Bus the subscriptions live on.
    bus: Arc<EventBus>,
}

impl OwnerGuard {
    /// Mints a new owner on `bus`.
    #[must_use]
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self {
            owner: OwnerId::next(),
            bus,
        }
    }

    /// The owner identity.
    #[inline]
    #[must_use]
    pub const fn owner(&self) -> OwnerId {
        self.owner
    }

    /// The bus subscriptions are made on.
    #[inline]
    #[must_use]
    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    /// Subscribes `callback` under this guard's owner.
    pub fn subscribe<E: Event>(&self, callback: &Callback<E>) {
        self.bus.subscribe(callback, self.owner);
    }

    /// Number of live subscriptions held by this guard.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.bus.owner_subscription_count(self.owner)
    }
}

impl Drop for OwnerGuard {
    fn drop(&mut self) {
        let removed = self.bus.remove_all(self.owner);
        tracing::debug!(owner = %self.owner, removed, "owner guard released");
    }
}
