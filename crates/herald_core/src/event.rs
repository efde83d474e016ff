//! # Events, Callbacks and Owners
//!
//! The three identities the bus routes and groups by:
//!
//! - [`Event`]: marker for a plain data record. The Rust type *is* the kind.
//! - [`Callback`]: a shared handler with a stable [`CallbackId`]. Clones keep
//!   the id, so a clone unsubscribes the original.
//! - [`OwnerId`]: the component a subscription was made for. Only used for
//!   bulk teardown.

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Marker for event kinds.
///
/// Event kinds are distinct types that carry only the payload their
/// subscribers need. They are moved into the bus on publish and only ever
/// handed out by shared reference afterwards.
///
/// ```rust,ignore
/// #[derive(Debug)]
/// struct LoadScene { scene: SceneId }
/// impl Event for LoadScene {}
/// ```
pub trait Event: Any + Send + Sync + 'static {}

static NEXT_CALLBACK_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_OWNER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`Callback`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CallbackId(u64);

impl CallbackId {
    fn next() -> Self {
        Self(NEXT_CALLBACK_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cb#{}", self.0)
    }
}

/// Process-unique identity of a subscribing component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OwnerId(u64);

impl OwnerId {
    /// Mints a fresh owner identity.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_OWNER_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "owner#{}", self.0)
    }
}

/// A subscriber for events of kind `E`.
///
/// The event kind is fixed by the type parameter, so a callback can never be
/// registered against a payload type it does not accept.
pub struct Callback<E: Event> {
    id: CallbackId,
    func: Arc<dyn Fn(&E) + Send + Sync>,
}

impl<E: Event> Callback<E> {
    /// Wraps a closure as a callback with a fresh identity.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        Self {
            id: CallbackId::next(),
            func: Arc::new(func),
        }
    }

    /// Returns the identity shared by this callback and its clones.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> CallbackId {
        self.id
    }

    /// Invokes the callback.
    #[inline]
    pub fn call(&self, event: &E) {
        (self.func)(event);
    }
}

impl<E: Event> Clone for Callback<E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            func: Arc::clone(&self.func),
        }
    }
}

impl<E: Event> fmt::Debug for Callback<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("id", &self.id)
            .field("kind", &std::any::type_name::<E>())
            .finish()
    }
}
