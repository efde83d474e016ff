//! # Scene Events
//!
//! The two event kinds the scene stack manager listens to.
//!
//! ```text
//! Gameplay / UI ──LoadScene{Inventory}──> bus ──> SceneStackManager::on_load
//! Gameplay / UI ──GoBack───────────────> bus ──> SceneStackManager::on_back
//! ```

use herald_core::Event;

use crate::scene::SceneId;

/// Request to load a scene on top of the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadScene {
    /// Scene to load.
    pub scene: SceneId,
}

impl LoadScene {
    /// Creates the request.
    #[inline]
    #[must_use]
    pub const fn new(scene: SceneId) -> Self {
        Self { scene }
    }
}

impl Event for LoadScene {}

/// Request to return to the previous scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GoBack;

impl Event for GoBack {}
