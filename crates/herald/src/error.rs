//! # Runtime Error Types

use herald_core::BusError;
use herald_scene::SceneError;
use thiserror::Error;

/// Errors that can occur while starting the runtime.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Bus lifecycle or configuration failure.
    #[error(transparent)]
    Bus(#[from] BusError),

    /// Scene stack configuration failure.
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// Malformed or unreadable runtime configuration.
    #[error("invalid runtime configuration: {0}")]
    Config(String),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
