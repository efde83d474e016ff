//! # Bus Configuration
//!
//! Loaded once at startup, usually as the `[bus]` table of the runtime TOML:
//!
//! ```toml
//! [bus]
//! # Omit for unlimited (drain fully every tick).
//! time_budget_secs = 0.004
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dispatch::{DispatchBudget, MAX_TICK_BUDGET};
use crate::error::{BusError, BusResult};

/// Configuration for an [`EventBus`](crate::EventBus).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BusConfig {
    /// Per-tick dispatch budget in seconds. `None` means unlimited.
    pub time_budget_secs: Option<f32>,
}

impl BusConfig {
    /// Unlimited budget: every tick drains the queue.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            time_budget_secs: None,
        }
    }

    /// Bounded budget, in seconds.
    #[must_use]
    pub const fn bounded(secs: f32) -> Self {
        Self {
            time_budget_secs: Some(secs),
        }
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::InvalidConfig`] on malformed TOML or an
    /// out-of-range budget.
    pub fn from_toml_str(source: &str) -> BusResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| BusError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::InvalidConfig`] if the file cannot be read or is
    /// invalid.
    pub fn from_toml_file(path: impl AsRef<Path>) -> BusResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| BusError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }

    /// Checks that a bounded budget lies within `0..=0.5` seconds.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::InvalidConfig`] for a negative, non-finite or too
    /// large budget.
    pub fn validate(&self) -> BusResult<()> {
        if let Some(secs) = self.time_budget_secs {
            let max = MAX_TICK_BUDGET.as_secs_f32();
            if !(0.0..=max).contains(&secs) {
                return Err(BusError::InvalidConfig(format!(
                    "time_budget_secs must be within 0..={max}, got {secs}"
                )));
            }
        }
        Ok(())
    }

    /// The dispatch budget this configuration describes.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::InvalidConfig`] if validation fails.
    pub fn budget(&self) -> BusResult<DispatchBudget> {
        self.validate()?;
        Ok(DispatchBudget::from(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_is_unlimited() {
        let config = BusConfig::default();
        assert_eq!(config, BusConfig::unlimited());
        assert_eq!(config.budget().unwrap(), DispatchBudget::Unlimited);
    }

    #[test]
    fn test_parse_bounded() {
        let config = BusConfig::from_toml_str("time_budget_secs = 0.004").unwrap();
        let limit = config.budget().unwrap().limit().unwrap();
        assert!(limit > Duration::from_micros(3_990));
        assert!(limit < Duration::from_micros(4_010));
    }

    #[test]
    fn test_parse_empty_document() {
        let config = BusConfig::from_toml_str("").unwrap();
        assert!(config.budget().unwrap().is_unlimited());
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(matches!(
            BusConfig::from_toml_str("time_budget_secs = 0.75"),
            Err(BusError::InvalidConfig(_))
        ));
        assert!(BusConfig::bounded(-0.1).validate().is_err());
        assert!(BusConfig::bounded(f32::NAN).validate().is_err());
        assert!(BusConfig::bounded(0.0).validate().is_ok());
        assert!(BusConfig::bounded(0.5).validate().is_ok());
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(BusConfig::from_toml_str("budget = 1").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = BusConfig::from_toml_file("/nonexistent/herald/bus.toml").unwrap_err();
        assert!(matches!(err, BusError::InvalidConfig(_)));
    }
}
