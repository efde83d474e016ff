//! # HERALD Runtime
//!
//! The lifecycle host around the bus and the scene stack:
//! ```text
//! start:
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ 1. validate config                                                  │
//! │ 2. global bus slot      ← EventBus (fails if already live)          │
//! │ 3. scene manager slot   ← SceneStackManager (fails if already live) │
//! │ 4. manager.attach(bus)  (LoadScene + GoBack subscriptions)          │
//! └─────────────────────────────────────────────────────────────────────┘
//! every scheduler iteration:
//!     tick() → bus.dispatch()   exactly once
//! teardown (shutdown or drop), exactly once:
//!     manager.detach() → scene slot emptied → bus.shutdown() → bus slot emptied
//! ```

use std::sync::Arc;

use herald_core::{global, DispatchStats, Event, EventBus, InstanceSlot, TickReport};
use herald_scene::{SceneLoader, SceneStackManager};

use crate::config::RuntimeConfig;
use crate::error::RuntimeResult;

static SCENES: InstanceSlot<SceneStackManager> = InstanceSlot::new("scene stack manager");

/// Returns the live scene stack manager.
///
/// # Errors
///
/// Returns [`BusError::NotInitialized`](herald_core::BusError::NotInitialized)
/// outside a running [`Runtime`].
pub fn scenes() -> RuntimeResult<Arc<SceneStackManager>> {
    Ok(SCENES.get()?)
}

/// Owns the process-wide bus and scene stack manager.
pub struct Runtime {
    /// The process-wide bus.
    bus: Arc<EventBus>,
    /// The process-wide scene manager.
    scenes: Arc<SceneStackManager>,
    /// Ticks driven so far.
    ticks: u64,
    /// Teardown not yet performed.
    live: bool,
}

impl Runtime {
    /// Initializes the bus and scene manager and wires them together.
    ///
    /// # Errors
    ///
    /// Fails on invalid configuration, or if a bus or scene manager is
    /// already live in this process.
    pub fn start(config: &RuntimeConfig, loader: Arc<dyn SceneLoader>) -> RuntimeResult<Self> {
        config.validate()?;
        let manager = SceneStackManager::new(&config.scenes, loader)?;

        let bus = global::init(&config.bus)?;
        let scenes = match SCENES.init(manager) {
            Ok(scenes) => scenes,
            Err(e) => {
                let _ = global::shutdown();
                return Err(e.into());
            }
        };
        scenes.attach(&bus);

        tracing::info!(
            base = %scenes.base(),
            budget = ?bus.budget(),
            "runtime started"
        );

        Ok(Self {
            bus,
            scenes,
            ticks: 0,
            live: true,
        })
    }

    /// Runs one scheduler iteration: exactly one dispatch.
    pub fn tick(&mut self) -> TickReport {
        self.ticks += 1;
        self.bus.dispatch()
    }

    /// Publishes an event on the runtime's bus.
    pub fn publish<E: Event>(&self, event: E) -> bool {
        self.bus.publish(event)
    }

    /// The runtime's bus.
    #[must_use]
    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    /// The runtime's scene manager.
    #[must_use]
    pub fn scenes(&self) -> &Arc<SceneStackManager> {
        &self.scenes
    }

    /// Ticks driven so far.
    #[inline]
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Dispatch statistics accumulated over every tick.
    #[must_use]
    pub fn stats(&self) -> DispatchStats {
        self.bus.stats()
    }

    /// Tears the runtime down.
    pub fn shutdown(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if !self.live {
            return;
        }
        self.live = false;

        let detached = self.scenes.detach();
        let _ = SCENES.take();
        let _ = global::shutdown();

        tracing::info!(ticks = self.ticks, detached, "runtime shut down");
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("bus", &self.bus)
            .field("scenes", &self.scenes)
            .field("ticks", &self.ticks)
            .field("live", &self.live)
            .finish()
    }
}
