//! # Subscriber Ledger
//!
//! Reverse index from owners (and from individual callbacks) to what they
//! registered. The ledger is the authoritative answer to "what is this owner
//! still listening to", independent of the kind-indexed registry, so that
//! tearing a component down can scrub every registration it made.

use std::any::TypeId;
use std::collections::HashMap;

use crate::event::{CallbackId, OwnerId};

/// A `(kind, callback)` registration.
pub type SubscriptionKey = (TypeId, CallbackId);

/// Owner-indexed record of subscriptions.
#[derive(Debug, Default)]
pub struct SubscriberLedger {
    /// Subscriptions per owner, in registration order.
    by_owner: HashMap<OwnerId, Vec<SubscriptionKey>>,
    /// Owner per subscription.
    by_callback: HashMap<SubscriptionKey, OwnerId>,
}

impl SubscriberLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `owner` registered `key`.
    ///
    /// A key already recorded (under any owner) is moved to `owner`.
    pub fn record(&mut self, owner: OwnerId, key: SubscriptionKey) {
        self.forget(key);
        self.by_owner.entry(owner).or_default().push(key);
        self.by_callback.insert(key, owner);
    }

    /// Forgets a single subscription. Returns the owner it was recorded under.
    pub fn forget(&mut self, key: SubscriptionKey) -> Option<OwnerId> {
        let owner = self.by_callback.remove(&key)?;

        if let Some(bucket) = self.by_owner.get_mut(&owner) {
            bucket.retain(|k| *k != key);
            if bucket.is_empty() {
                self.by_owner.remove(&owner);
            }
        }
        Some(owner)
    }

    /// Removes and returns everything recorded for `owner`.
    pub fn take_owner(&mut self, owner: OwnerId) -> Vec<SubscriptionKey> {
        let keys = self.by_owner.remove(&owner).unwrap_or_default();
        for key in &keys {
            self.by_callback.remove(key);
        }
        keys
    }

    /// Number of live subscriptions recorded for `owner`.
    #[must_use]
    pub fn subscription_count(&self, owner: OwnerId) -> usize {
        self.by_owner.get(&owner).map_or(0, Vec::len)
    }

    /// Number of owners with at least one subscription.
    #[must_use]
    pub fn owner_count(&self) -> usize {
        self.by_owner.len()
    }

    /// Forgets everything.
    pub fn clear(&mut self) {
        self.by_owner.clear();
        self.by_callback.clear();
    }
}
