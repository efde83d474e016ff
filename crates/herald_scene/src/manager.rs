//! # Scene Stack Manager
//!
//! Policy over the event bus and a [`SceneLoader`]:
//!
//! ```text
//! LoadScene{s}:
//!   top == s                 → no-op ("already loaded")
//!   otherwise                → unload(top) unless top is the base
//!                              load_additive(s), push(s)
//!
//! GoBack:
//!   len < 2 or top == base   → no-op
//!   otherwise                → load_additive(below) unless below is the base
//!                              unload(top), pop()
//! ```
//!
//! The manager listens through callbacks holding only a `Weak` to itself,
//! under an [`OwnerGuard`]. Detaching (or dropping the manager) scrubs both
//! subscriptions from the bus.

use std::sync::{Arc, Weak};

use herald_core::{Callback, EventBus, OwnerGuard, OwnerId};
use parking_lot::Mutex;

use crate::config::SceneConfig;
use crate::error::SceneResult;
use crate::events::{GoBack, LoadScene};
use crate::loader::SceneLoader;
use crate::scene::SceneId;
use crate::stack::SceneStack;

/// Keeps the scene back-stack in step with load/back requests.
pub struct SceneStackManager {
    /// Loaded scenes, base first.
    stack: Mutex<SceneStack>,
    /// Where load/unload requests go.
    loader: Arc<dyn SceneLoader>,
    /// Bus subscriptions while attached.
    subscriptions: Mutex<Option<OwnerGuard>>,
}

impl SceneStackManager {
    /// Creates a manager whose stack holds only the configured base.
    ///
    /// The base is assumed to be loaded already and is never unloaded.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidConfig`](crate::SceneError::InvalidConfig)
    /// for a capacity below 2.
    pub fn new(config: &SceneConfig, loader: Arc<dyn SceneLoader>) -> SceneResult<Self> {
        config.validate()?;
        Ok(Self {
            stack: Mutex::new(SceneStack::new(config.base, config.capacity)),
            loader,
            subscriptions: Mutex::new(None),
        })
    }

    /// Subscribes to [`LoadScene`] and [`GoBack`] on `bus`.
    ///
    /// Attaching again first drops the previous subscriptions.
    pub fn attach(self: &Arc<Self>, bus: &Arc<EventBus>) {
        let guard = OwnerGuard::new(Arc::clone(bus));

        let weak: Weak<Self> = Arc::downgrade(self);
        guard.subscribe(&Callback::new(move |e: &LoadScene| {
            if let Some(manager) = weak.upgrade() {
                let _ = manager.load(e.scene);
            }
        }));

        let weak: Weak<Self> = Arc::downgrade(self);
        guard.subscribe(&Callback::new(move |_: &GoBack| {
            if let Some(manager) = weak.upgrade() {
                let _ = manager.go_back();
            }
        }));

        tracing::debug!(owner = %guard.owner(), "scene stack manager attached");
        let previous = self.subscriptions.lock().replace(guard);
        drop(previous);
    }

    /// Removes this manager's subscriptions. Returns how many were removed.
    pub fn detach(&self) -> usize {
        let Some(guard) = self.subscriptions.lock().take() else {
            return 0;
        };
        let count = guard.subscription_count();
        drop(guard);
        count
    }

    /// Returns `true` while subscribed to a bus.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.subscriptions.lock().is_some()
    }

    /// Owner identity of the live subscriptions.
    #[must_use]
    pub fn owner(&self) -> Option<OwnerId> {
        self.subscriptions.lock().as_ref().map(OwnerGuard::owner)
    }

    /// Handles a load request. Returns `false` if `scene` was already on top
    /// or is the base scene.
    pub fn load(&self, scene: SceneId) -> bool {
        let mut stack = self.stack.lock();
        let top = stack.top();

        if top == scene {
            tracing::info!(scene = %scene, "scene already loaded");
            return false;
        }
        if scene == stack.base() {
            tracing::warn!(scene = %scene, "base scene is always resident, load ignored");
            return false;
        }

        if top != stack.base() {
            let _ = self.loader.unload(top);
        }
        let _ = self.loader.load_additive(scene);

        if let Some(evicted) = stack.push(scene) {
            tracing::debug!(evicted = %evicted, "scene history full, oldest entry evicted");
        }
        tracing::debug!(from = %top, to = %scene, depth = stack.len(), "scene loaded");
        true
    }

    /// Handles a back request. Returns `false` if there was nothing to pop.
    pub fn go_back(&self) -> bool {
        let mut stack = self.stack.lock();
        let base = stack.base();
        let top = stack.top();

        let Some(below) = stack.second_from_top() else {
            tracing::debug!(scene = %top, "go back ignored, only the base is loaded");
            return false;
        };
        if top == base {
            tracing::debug!(scene = %top, "go back ignored, base is on top");
            return false;
        }

        // The base is never unloaded, so it needs no load either.
        if below != base {
            let _ = self.loader.load_additive(below);
        }
        let _ = self.loader.unload(top);
        let _ = stack.pop();

        tracing::debug!(from = %top, to = %below, depth = stack.len(), "went back");
        true
    }

    /// The stack, base first.
    #[must_use]
    pub fn stack(&self) -> Vec<SceneId> {
        self.stack.lock().as_slice().to_vec()
    }

    /// The scene on top.
    #[must_use]
    pub fn current(&self) -> SceneId {
        self.stack.lock().top()
    }

    /// The permanent base scene.
    #[must_use]
    pub fn base(&self) -> SceneId {
        self.stack.lock().base()
    }
}

impl std::fmt::Debug for SceneStackManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneStackManager")
            .field("stack", &self.stack.lock().as_slice())
            .field("attached", &self.is_attached())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{RecordingSceneLoader, SceneOpKind::{Load, Unload}};

    fn manager() -> (Arc<SceneStackManager>, Arc<RecordingSceneLoader>) {
        let loader = Arc::new(RecordingSceneLoader::new());
        let manager =
            SceneStackManager::new(&SceneConfig::default(), loader.clone()).unwrap();
        (Arc::new(manager), loader)
    }

    #[test]
    fn test_load_from_base_does_not_unload_base() {
        let (manager, loader) = manager();
        assert!(manager.load(SceneId::Gameplay));
        assert_eq!(manager.stack(), vec![SceneId::Main, SceneId::Gameplay]);
        assert_eq!(loader.requests(), vec![(Load, SceneId::Gameplay)]);
    }

    #[test]
    fn test_load_same_scene_is_noop() {
        let (manager, loader) = manager();
        assert!(manager.load(SceneId::Gameplay));
        let _ = loader.drain();

        assert!(!manager.load(SceneId::Gameplay));
        assert!(loader.ops().is_empty());
        assert_eq!(manager.stack().len(), 2);
    }

    #[test]
    fn test_load_then_back() {
        let (manager, loader) = manager();
        let _ = manager.load(SceneId::Gameplay);
        let _ = loader.drain();

        assert!(manager.load(SceneId::Inventory));
        assert_eq!(
            loader.requests(),
            vec![(Unload, SceneId::Gameplay), (Load, SceneId::Inventory)]
        );
        let _ = loader.drain();

        assert!(manager.go_back());
        assert_eq!(manager.current(), SceneId::Gameplay);
        assert_eq!(
            loader.requests(),
            vec![(Load, SceneId::Gameplay), (Unload, SceneId::Inventory)]
        );
    }

    #[test]
    fn test_back_to_base_skips_base_load() {
        let (manager, loader) = manager();
        let _ = manager.load(SceneId::Settings);
        let _ = loader.drain();

        assert!(manager.go_back());
        assert_eq!(manager.stack(), vec![SceneId::Main]);
        assert_eq!(loader.requests(), vec![(Unload, SceneId::Settings)]);

        assert!(!manager.go_back());
    }

    #[test]
    fn test_load_base_is_ignored() {
        let (manager, loader) = manager();
        let _ = manager.load(SceneId::Gameplay);
        let _ = loader.drain();

        assert!(!manager.load(SceneId::Main));
        assert_eq!(manager.stack(), vec![SceneId::Main, SceneId::Gameplay]);
        assert!(loader.ops().is_empty());

        assert!(manager.go_back());
        assert_eq!(manager.stack(), vec![SceneId::Main]);
        assert_eq!(loader.requests(), vec![(Unload, SceneId::Gameplay)]);
    }

    #[test]
    fn test_attach_and_detach() {
        let bus = Arc::new(EventBus::default());
        let (manager, loader) = manager();

        manager.attach(&bus);
        assert!(manager.is_attached());
        assert!(manager.owner().is_some());
        assert!(bus.publish(LoadScene::new(SceneId::Credits)));
        let _ = bus.dispatch();
        assert_eq!(manager.current(), SceneId::Credits);
        assert_eq!(loader.requests(), vec![(Load, SceneId::Credits)]);

        assert_eq!(manager.detach(), 2);
        assert!(!bus.publish(GoBack));
        assert_eq!(manager.detach(), 0);
    }

    #[test]
    fn test_reattach_replaces_subscriptions() {
        let bus = Arc::new(EventBus::default());
        let (manager, _loader) = manager();

        manager.attach(&bus);
        manager.attach(&bus);
        assert_eq!(bus.subscriber_count::<LoadScene>(), 1);
        assert_eq!(bus.subscriber_count::<GoBack>(), 1);
    }

    #[test]
    fn test_dropped_manager_is_not_called() {
        let bus = Arc::new(EventBus::default());
        let (manager, loader) = manager();
        manager.attach(&bus);

        drop(manager);

        // The guard died with the manager.
        assert!(!bus.publish(LoadScene::new(SceneId::Gameplay)));
        assert!(loader.ops().is_empty());
    }

    #[test]
    fn test_rejects_bad_config() {
        let loader = Arc::new(RecordingSceneLoader::new());
        let config = SceneConfig {
            capacity: 1,
            ..SceneConfig::default()
        };
        assert!(SceneStackManager::new(&config, loader).is_err());
    }
}
