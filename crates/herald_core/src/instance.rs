//! # Single-Instance Slot
//!
//! Holder for a process-wide manager with an explicit `init`/`take`
//! lifecycle. At most one instance is live per slot, and reading an empty
//! slot is an error rather than a silent re-creation.
//!
//! ```rust,ignore
//! static SCENES: InstanceSlot<SceneStackManager> = InstanceSlot::new("scene stack manager");
//!
//! SCENES.init(manager)?;       // once, at startup
//! let scenes = SCENES.get()?;  // anywhere
//! SCENES.take();               // once, at teardown
//! ```

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{BusError, BusResult};

/// A `static`-constructible single-instance holder.
pub struct InstanceSlot<T> {
    /// Name used in errors.
    name: &'static str,
    /// The live instance, if any.
    slot: RwLock<Option<Arc<T>>>,
}

impl<T> InstanceSlot<T> {
    /// Creates an empty slot.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: parking_lot::const_rwlock(None),
        }
    }

    /// Installs the instance.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::AlreadyInitialized`] if an instance is live.
    pub fn init(&self, value: T) -> BusResult<Arc<T>> {
        let mut slot = self.slot.write();
        if slot.is_some() {
            return Err(BusError::AlreadyInitialized(self.name));
        }
        let instance = Arc::new(value);
        *slot = Some(Arc::clone(&instance));
        Ok(instance)
    }

    /// Returns the live instance.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::NotInitialized`] before `init` or after `take`.
    pub fn get(&self) -> BusResult<Arc<T>> {
        self.slot
            .read()
            .as_ref()
            .map(Arc::clone)
            .ok_or(BusError::NotInitialized(self.name))
    }

    /// Removes the live instance, leaving the slot empty.
    pub fn take(&self) -> Option<Arc<T>> {
        self.slot.write().take()
    }

    /// Returns `true` if an instance is live.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Slot name.
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}
