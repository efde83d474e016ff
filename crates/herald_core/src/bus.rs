//! # Event Bus
//!
//! The public face of the bus, coordinating registry, ledger and queue.
//!
//! ## Architecture
//!
//! ```text
//! Producers                     EventBus                        Subscribers
//!                ┌──────────────────────────────────────┐
//!  publish(e) ──>│ admission: registry.contains(kind)?  │
//!                │   no  → false                        │
//!                │   yes → queue.push(e), true          │
//!                ├──────────────────────────────────────┤
//!  dispatch() ──>│ pop → snapshot(kind) → unlock ───────┼──> cb1(&e), cb2(&e) ...
//!                ├──────────────────────────────────────┤
//!  subscribe  ──>│ registry (kind → [cb])               │
//!  remove_all ──>│ ledger   (owner → [(kind, cb)])      │
//!                └──────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! - Every operation takes `&self`. The state lock is never held while a
//!   callback runs, so callbacks may publish, subscribe or unsubscribe.
//! - One scheduler thread drives `dispatch`. The lock only serializes
//!   producers and registry changes.
//! - Nothing here fails the host: rejection is `false`, stale events are
//!   logged and dropped.

use std::any::{type_name, TypeId};

use parking_lot::Mutex;

use crate::config::BusConfig;
use crate::dispatch::{self, Delivery, DispatchBudget, DispatchStats, TickReport};
use crate::error::BusResult;
use crate::event::{Callback, Event, OwnerId};
use crate::ledger::SubscriberLedger;
use crate::queue::{EventQueue, QueuedEvent};
use crate::registry::{EventRegistry, Handler};

/// Everything guarded by the bus lock.
#[derive(Default)]
struct BusState {
    /// Kind → subscribers.
    registry: EventRegistry,
    /// Owner → subscriptions.
    ledger: SubscriberLedger,
    /// Pending events, FIFO.
    queue: EventQueue,
    /// Accumulated tick statistics.
    stats: DispatchStats,
}

/// Typed publish/subscribe event bus.
pub struct EventBus {
    /// Registry, ledger and queue.
    state: Mutex<BusState>,
    /// Per-tick dispatch budget.
    budget: DispatchBudget,
}

impl EventBus {
    /// Creates a bus with the given dispatch budget.
    #[must_use]
    pub fn new(budget: DispatchBudget) -> Self {
        Self {
            state: Mutex::new(BusState::default()),
            budget,
        }
    }

    /// Creates a bus from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::InvalidConfig`](crate::BusError::InvalidConfig) if
    /// the budget is out of range.
    pub fn from_config(config: &BusConfig) -> BusResult<Self> {
        Ok(Self::new(config.budget()?))
    }

    /// Registers `callback` for events of kind `E` on behalf of `owner`.
    ///
    /// Subscribing a callback that is already registered for `E` replaces
    /// the previous registration: the callback moves to the end of the
    /// invocation order and to `owner`'s bucket, and still fires once per
    /// event.
    pub fn subscribe<E: Event>(&self, callback: &Callback<E>, owner: OwnerId) {
        let kind = TypeId::of::<E>();
        let key = (kind, callback.id());

        let mut state = self.state.lock();
        let replaced = state.registry.remove(kind, callback.id());
        state.ledger.record(owner, key);
        state
            .registry
            .insert(kind, type_name::<E>(), Handler::from_callback(callback));

        tracing::debug!(
            kind = type_name::<E>(),
            callback = %callback.id(),
            owner = %owner,
            replaced,
            "subscribed"
        );
    }

    /// Removes `callback` from the subscribers of `E`.
    ///
    /// When it was the last subscriber, `E` leaves the registry and further
    /// publishes of `E` are rejected. Unknown callbacks are a no-op.
    ///
    /// Returns `true` if a registration was removed.
    pub fn unsubscribe<E: Event>(&self, callback: &Callback<E>) -> bool {
        let kind = TypeId::of::<E>();

        let mut state = self.state.lock();
        state.ledger.forget((kind, callback.id()));
        let removed = state.registry.remove(kind, callback.id());

        if removed {
            tracing::debug!(kind = type_name::<E>(), callback = %callback.id(), "unsubscribed");
        }
        removed
    }

    /// Unsubscribes everything `owner` registered.
    ///
    /// Returns the number of registrations removed.
    pub fn remove_all(&self, owner: OwnerId) -> usize {
        let mut state = self.state.lock();
        let keys = state.ledger.take_owner(owner);

        let mut removed = 0;
        for (kind, id) in keys {
            let name = state.registry.kind_name(kind);
            if !state.registry.remove(kind, id) {
                continue;
            }
            removed += 1;
            if !state.registry.contains(kind) {
                tracing::debug!(kind = name.unwrap_or("<unknown>"), "last subscriber removed, kind closed");
            }
        }

        if removed > 0 {
            tracing::debug!(owner = %owner, removed, "owner subscriptions removed");
        }
        removed
    }

    /// Enqueues `event` for the next dispatch.
    ///
    /// Returns `false`, without enqueueing, if no subscriber exists for `E`.
    pub fn publish<E: Event>(&self, event: E) -> bool {
        let state = self.state.lock();
        if !state.registry.contains(TypeId::of::<E>()) {
            tracing::debug!(kind = type_name::<E>(), "publish rejected, no subscribers");
            return false;
        }
        state.queue.push(QueuedEvent::new(event))
    }

    /// Runs one tick of the dispatch loop.
    ///
    /// Call exactly once per scheduler iteration.
    pub fn dispatch(&self) -> TickReport {
        let report = dispatch::run_tick(self.budget, || self.deliver_next(), || self.pending_count());
        self.state.lock().stats.record(&report);
        report
    }

    /// Pops the front event and delivers it to a snapshot of its subscribers.
    fn deliver_next(&self) -> Option<Delivery> {
        let (event, handlers) = {
            let state = self.state.lock();
            let event = state.queue.pop()?;
            let handlers = state.registry.snapshot(event.kind());
            (event, handlers)
        };

        let Some(handlers) = handlers else {
            tracing::warn!(kind = event.name(), "no subscribers left for queued event, dropped");
            return Some(Delivery::Stale);
        };

        for handler in &handlers {
            handler.invoke(event.payload());
        }
        Some(Delivery::Delivered)
    }

    /// Clears every subscription, the ledger and the pending queue.
    ///
    /// Safe while a dispatch is in flight: the subscribers already
    /// snapshotted for the current event still run, then the loop finds the
    /// queue empty. Every later `publish` is rejected.
    pub fn shutdown(&self) {
        let mut state = self.state.lock();
        let kinds = state.registry.kind_count();
        state.registry.clear();
        state.ledger.clear();
        let dropped = state.queue.clear();

        tracing::info!(kinds, dropped, "event bus shut down");
    }

    /// Number of events waiting for dispatch.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Would a publish of `E` be admitted right now?
    #[must_use]
    pub fn has_subscribers<E: Event>(&self) -> bool {
        self.state.lock().registry.contains(TypeId::of::<E>())
    }

    /// Number of callbacks registered for `E`.
    #[must_use]
    pub fn subscriber_count<E: Event>(&self) -> usize {
        self.state.lock().registry.handler_count(TypeId::of::<E>())
    }

    /// Is `callback` currently registered for `E`?
    #[must_use]
    pub fn is_subscribed<E: Event>(&self, callback: &Callback<E>) -> bool {
        self.state
            .lock()
            .registry
            .contains_handler(TypeId::of::<E>(), callback.id())
    }

    /// Number of live registrations made on behalf of `owner`.
    #[must_use]
    pub fn owner_subscription_count(&self, owner: OwnerId) -> usize {
        self.state.lock().ledger.subscription_count(owner)
    }

    /// Number of event kinds with at least one subscriber.
    #[must_use]
    pub fn kind_count(&self) -> usize {
        self.state.lock().registry.kind_count()
    }

    /// The per-tick dispatch budget.
    #[inline]
    #[must_use]
    pub const fn budget(&self) -> DispatchBudget {
        self.budget
    }

    /// Statistics accumulated over every tick so far.
    #[must_use]
    pub fn stats(&self) -> DispatchStats {
        self.state.lock().stats
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DispatchBudget::Unlimited)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("EventBus")
            .field("budget", &self.budget)
            .field("kinds", &state.registry.kind_count())
            .field("owners", &state.ledger.owner_count())
            .field("pending", &state.queue.len())
            .finish()
    }
}
