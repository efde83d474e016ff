//! # Scene Stack Configuration
//!
//! ```toml
//! [scenes]
//! base = "main"
//! capacity = 8
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};
use crate::scene::SceneId;
use crate::stack::DEFAULT_STACK_CAPACITY;

/// Configuration for a [`SceneStackManager`](crate::SceneStackManager).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Permanent base scene, loaded before the manager starts.
    pub base: SceneId,
    /// Stack capacity, base included.
    pub capacity: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            base: SceneId::Main,
            capacity: DEFAULT_STACK_CAPACITY,
        }
    }
}

impl SceneConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidConfig`] on malformed TOML, an unknown
    /// scene name, or a capacity below 2.
    pub fn from_toml_str(source: &str) -> SceneResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| SceneError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the capacity leaves room above the base.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidConfig`] for a capacity below 2.
    pub fn validate(&self) -> SceneResult<()> {
        if self.capacity < 2 {
            return Err(SceneError::InvalidConfig(format!(
                "capacity must be at least 2, got {}",
                self.capacity
            )));
        }
        Ok(())
    }
}
