//! # Bus Error Types
//!
//! Errors surfaced by bus construction and lifecycle management.
//!
//! Bus operations themselves (`subscribe`, `unsubscribe`, `publish`,
//! `dispatch`) never fail: they report through booleans and counts.

use thiserror::Error;

/// Errors that can occur while configuring or accessing the bus.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BusError {
    /// A single-instance slot was read before `init` or after teardown.
    #[error("{0} is not initialized")]
    NotInitialized(&'static str),

    /// A single-instance slot already holds a live instance.
    #[error("{0} is already initialized")]
    AlreadyInitialized(&'static str),

    /// Invalid configuration value or file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for bus lifecycle operations.
pub type BusResult<T> = Result<T, BusError>;
