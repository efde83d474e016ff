//! # HERALD
//!
//! The host crate, integrating the event bus and the scene stack.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              HERALD RUNTIME                             │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────┐   LoadScene / GoBack    ┌─────────────────────┐   │
//! │  │  herald_core    │────────────────────────>│  herald_scene       │   │
//! │  │                 │                         │                     │   │
//! │  │  • Registry     │                         │  • SceneStack       │   │
//! │  │  • Ledger       │                         │  • Manager          │   │
//! │  │  • Queue        │                         │  • SceneLoader ─────┼──>│ host
//! │  │  • Dispatch     │                         │                     │   │
//! │  └────────▲────────┘                         └─────────────────────┘   │
//! │           │ tick() once per scheduler iteration                         │
//! │        Runtime                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `config`: one TOML file for bus and scene settings
//! - `runtime`: start / tick / shutdown lifecycle

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod runtime;

// Re-export the units
pub use herald_core as core;
pub use herald_scene as scene;

pub use config::RuntimeConfig;
pub use error::{RuntimeError, RuntimeResult};
pub use runtime::{scenes, Runtime};
