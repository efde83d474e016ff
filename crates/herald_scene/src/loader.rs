//! # Scene Loader Capability
//!
//! The manager only *requests* loads and unloads; how content is streamed in
//! is the host's business. Requests are fire-and-forget and return an opaque
//! [`SceneOp`] handle.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::scene::SceneId;

/// Kind of scene operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SceneOpKind {
    /// Additive load.
    Load,
    /// Unload.
    Unload,
}

/// Handle to an issued scene operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SceneOp {
    /// Loader-assigned operation id.
    pub id: u64,
    /// Target scene.
    pub scene: SceneId,
    /// What was requested.
    pub kind: SceneOpKind,
}

/// Asynchronous scene loading, as seen by the manager.
pub trait SceneLoader: Send + Sync {
    /// Starts loading `scene` additively.
    fn load_additive(&self, scene: SceneId) -> SceneOp;

    /// Starts unloading `scene`.
    fn unload(&self, scene: SceneId) -> SceneOp;
}

/// Loader that records requests in issue order.
///
/// Used by hosts without a content pipeline and by tests.
#[derive(Debug, Default)]
pub struct RecordingSceneLoader {
    /// Next operation id.
    next_id: AtomicU64,
    /// Issued operations.
    ops: Mutex<Vec<SceneOp>>,
}

impl RecordingSceneLoader {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, scene: SceneId, kind: SceneOpKind) -> SceneOp {
        let op = SceneOp {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            scene,
            kind,
        };
        self.ops.lock().push(op);
        op
    }

    /// Operations issued so far.
    #[must_use]
    pub fn ops(&self) -> Vec<SceneOp> {
        self.ops.lock().clone()
    }

    /// Issued operations as `(kind, scene)` pairs, ids stripped.
    #[must_use]
    pub fn requests(&self) -> Vec<(SceneOpKind, SceneId)> {
        self.ops.lock().iter().map(|op| (op.kind, op.scene)).collect()
    }

    /// Takes and clears the recorded operations.
    pub fn drain(&self) -> Vec<SceneOp> {
        std::mem::take(&mut *self.ops.lock())
    }
}

impl SceneLoader for RecordingSceneLoader {
    fn load_additive(&self, scene: SceneId) -> SceneOp {
        self.record(scene, SceneOpKind::Load)
    }

    fn unload(&self, scene: SceneId) -> SceneOp {
        self.record(scene, SceneOpKind::Unload)
    }
}
