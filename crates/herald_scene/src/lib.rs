//! # HERALD Scene Stack
//!
//! Additive scene navigation driven by the event bus.
//!
//! ## Flow
//!
//! ```text
//! publish(LoadScene{Inventory})     stack [Main, Gameplay]
//!        │
//!        ▼  dispatch (next tick)
//! SceneStackManager::load ──> loader.unload(Gameplay)
//!                         ──> loader.load_additive(Inventory)
//!                                   stack [Main, Gameplay, Inventory]
//! publish(GoBack)
//!        │
//!        ▼
//! SceneStackManager::go_back ──> loader.load_additive(Gameplay)
//!                            ──> loader.unload(Inventory)
//!                                   stack [Main, Gameplay]
//! ```
//!
//! Scene loading itself is behind [`SceneLoader`]; the manager never waits
//! for it.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod events;
pub mod loader;
pub mod manager;
pub mod scene;
pub mod stack;

pub use config::SceneConfig;
pub use error::{SceneError, SceneResult};
pub use events::{GoBack, LoadScene};
pub use loader::{RecordingSceneLoader, SceneLoader, SceneOp, SceneOpKind};
pub use manager::SceneStackManager;
pub use scene::SceneId;
pub use stack::{SceneStack, DEFAULT_STACK_CAPACITY};
