//! # Runtime Configuration
//!
//! One TOML file for the whole host:
//!
//! ```toml
//! [bus]
//! time_budget_secs = 0.004
//!
//! [scenes]
//! base = "main"
//! capacity = 8
//! ```
//!
//! Every table and key is optional; omitted values take their defaults.

use std::path::Path;

use herald_core::BusConfig;
use herald_scene::SceneConfig;
use serde::{Deserialize, Serialize};

use crate::error::{RuntimeError, RuntimeResult};

/// Configuration for a [`Runtime`](crate::Runtime).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Event bus settings.
    pub bus: BusConfig,
    /// Scene stack settings.
    pub scenes: SceneConfig,
}

impl RuntimeConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Config`] on malformed TOML, or the bus/scene
    /// error for out-of-range values.
    pub fn from_toml_str(source: &str) -> RuntimeResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| RuntimeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Config`] if the file cannot be read, otherwise
    /// as [`RuntimeConfig::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> RuntimeResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| RuntimeError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }

    /// Validates both sections.
    ///
    /// # Errors
    ///
    /// Returns the first bus or scene validation error.
    pub fn validate(&self) -> RuntimeResult<()> {
        self.bus.validate()?;
        self.scenes.validate()?;
        Ok(())
    }
}
