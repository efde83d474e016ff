//! # Scene Stack
//!
//! Bounded back-stack of loaded scenes with a permanent base at index 0.
//!
//! ```text
//! capacity 4, base = Main
//!
//! [Main, A, B, C]  push(D)  →  [Main, B, C, D]   (oldest non-base evicted)
//! [Main, B]        pop()    →  [Main]            → Some(B)
//! [Main]           pop()    →  [Main]            → None (base stays)
//! ```

use crate::scene::SceneId;

/// Default stack capacity, base included.
pub const DEFAULT_STACK_CAPACITY: usize = 8;

/// Ordered list of loaded scenes, oldest first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneStack {
    /// Scenes, `entries[0]` is the base.
    entries: Vec<SceneId>,
    /// Maximum length, base included. At least 2.
    capacity: usize,
}

impl SceneStack {
    /// Creates a stack holding only `base`.
    ///
    /// Capacities below 2 are raised to 2 so the stack can hold more than
    /// its base.
    #[must_use]
    pub fn new(base: SceneId, capacity: usize) -> Self {
        let capacity = capacity.max(2);
        let mut entries = Vec::with_capacity(capacity);
        entries.push(base);
        Self { entries, capacity }
    }

    /// The permanent base scene.
    #[inline]
    #[must_use]
    pub fn base(&self) -> SceneId {
        self.entries[0]
    }

    /// The scene on top.
    #[inline]
    #[must_use]
    pub fn top(&self) -> SceneId {
        self.entries[self.entries.len() - 1]
    }

    /// The scene right below the top, if any.
    #[must_use]
    pub fn second_from_top(&self) -> Option<SceneId> {
        self.entries.len().checked_sub(2).map(|i| self.entries[i])
    }

    /// Number of entries, base included.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: the base is never removed.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum length, base included.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Pushes `scene`, evicting the oldest non-base entry when full.
    ///
    /// Returns the evicted scene, if any.
    pub fn push(&mut self, scene: SceneId) -> Option<SceneId> {
        let evicted = (self.entries.len() >= self.capacity).then(|| self.entries.remove(1));
        self.entries.push(scene);
        evicted
    }

    /// Pops the top scene. The base is never popped.
    pub fn pop(&mut self) -> Option<SceneId> {
        if self.entries.len() < 2 {
            return None;
        }
        self.entries.pop()
    }

    /// The entries, base first.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[SceneId] {
        &self.entries
    }
}
