//! # Event Kind Registry
//!
//! Maps each event kind (`TypeId`) to the ordered list of handlers currently
//! registered for it.
//!
//! ## Invariants
//!
//! - Insertion order is invocation order.
//! - A kind with no handlers is absent from the map. `contains` is therefore
//!   the admission test used by `publish`.
//! - Handlers are type-erased at registration time. The typed closure is
//!   recovered with `downcast_ref`, which cannot fail for events queued under
//!   the same `TypeId`.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use crate::event::{Callback, CallbackId, Event};

type ErasedFn = Arc<dyn Fn(&dyn Any) + Send + Sync>;

/// A type-erased subscriber.
#[derive(Clone)]
pub struct Handler {
    id: CallbackId,
    invoke: ErasedFn,
}

impl Handler {
    /// Erases a typed callback.
    #[must_use]
    pub fn from_callback<E: Event>(callback: &Callback<E>) -> Self {
        let typed = callback.clone();
        let invoke: ErasedFn = Arc::new(move |payload: &dyn Any| {
            if let Some(event) = payload.downcast_ref::<E>() {
                typed.call(event);
            } else {
                tracing::debug!(
                    kind = std::any::type_name::<E>(),
                    "payload type mismatch, handler skipped"
                );
            }
        });

        Self {
            id: callback.id(),
            invoke,
        }
    }

    /// Returns the callback identity.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> CallbackId {
        self.id
    }

    /// Invokes the handler with a type-erased payload.
    #[inline]
    pub fn invoke(&self, payload: &dyn Any) {
        (self.invoke)(payload);
    }
}

impl std::fmt::Debug for Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handler").field("id", &self.id).finish()
    }
}

/// Subscriber set for one event kind.
#[derive(Debug)]
struct KindEntry {
    /// Kind name, for diagnostics.
    name: &'static str,
    /// Handlers in invocation order.
    handlers: Vec<Handler>,
}

/// Kind-indexed subscriber sets.
#[derive(Debug, Default)]
pub struct EventRegistry {
    kinds: HashMap<TypeId, KindEntry>,
}

impl EventRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler to the kind's subscriber set, creating the set.
    pub fn insert(&mut self, kind: TypeId, name: &'static str, handler: Handler) {
        self.kinds
            .entry(kind)
            .or_insert_with(|| KindEntry {
                name,
                handlers: Vec::with_capacity(4),
            })
            .handlers
            .push(handler);
    }

    /// Removes a handler. Drops the kind when its last handler goes.
    ///
    /// Returns `false` if the handler was not registered for `kind`.
    pub fn remove(&mut self, kind: TypeId, id: CallbackId) -> bool {
        let Some(entry) = self.kinds.get_mut(&kind) else {
            return false;
        };

        let Some(index) = entry.handlers.iter().position(|h| h.id == id) else {
            return false;
        };
        entry.handlers.remove(index);

        if entry.handlers.is_empty() {
            self.kinds.remove(&kind);
        }
        true
    }

    /// Admission test: does `kind` have at least one subscriber?
    #[inline]
    #[must_use]
    pub fn contains(&self, kind: TypeId) -> bool {
        self.kinds.contains_key(&kind)
    }

    /// Is `id` registered for `kind`?
    #[must_use]
    pub fn contains_handler(&self, kind: TypeId, id: CallbackId) -> bool {
        self.kinds
            .get(&kind)
            .is_some_and(|entry| entry.handlers.iter().any(|h| h.id == id))
    }

    /// Number of handlers registered for `kind`.
    #[must_use]
    pub fn handler_count(&self, kind: TypeId) -> usize {
        self.kinds.get(&kind).map_or(0, |entry| entry.handlers.len())
    }

    /// Copies the kind's handlers so they can be invoked without holding the
    /// registry. Callbacks are then free to subscribe and unsubscribe.
    #[must_use]
    pub fn snapshot(&self, kind: TypeId) -> Option<Vec<Handler>> {
        self.kinds.get(&kind).map(|entry| entry.handlers.clone())
    }

    /// Name of a registered kind.
    #[must_use]
    pub fn kind_name(&self, kind: TypeId) -> Option<&'static str> {
        self.kinds.get(&kind).map(|entry| entry.name)
    }

    /// Number of kinds with at least one subscriber.
    #[inline]
    #[must_use]
    pub fn kind_count(&self) -> usize {
        self.kinds.len()
    }

    /// Returns `true` if no kind has subscribers.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Drops every subscriber set.
    pub fn clear(&mut self) {
        self.kinds.clear();
    }
}
