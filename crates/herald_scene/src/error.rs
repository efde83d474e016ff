//! # Scene Error Types

use thiserror::Error;

/// Errors that can occur while configuring the scene stack.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// Invalid configuration value or file.
    #[error("invalid scene configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for scene stack setup.
pub type SceneResult<T> = Result<T, SceneError>;
