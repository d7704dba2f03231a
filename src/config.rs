//! Simulation configuration
//!
//! Force constants and the run budget are plain values handed to the
//! integrator and scheduler, so independent simulations can use different
//! tuning. A configuration can also be loaded from YAML:
//!
//! ```yaml
//! forces:
//!   k_repel: 0.005
//!   k_attract: 0.005
//! run:
//!   duration_seconds: 2.0
//!   max_steps: 500
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading or validating a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
}

/// Force strength constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceConfig {
    /// Repulsion strength; magnitude is `k_repel / distance`
    pub k_repel: f64,
    /// Attraction strength; magnitude is `k_attract * distance²`
    pub k_attract: f64,
}

impl ForceConfig {
    pub const DEFAULT_K_REPEL: f64 = 0.005;
    pub const DEFAULT_K_ATTRACT: f64 = 0.005;
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            k_repel: Self::DEFAULT_K_REPEL,
            k_attract: Self::DEFAULT_K_ATTRACT,
        }
    }
}

/// How long the scheduler may run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Wall-clock budget. Zero allows at most one step, negative allows none.
    pub duration_seconds: f64,
    /// Optional cap on the number of steps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            duration_seconds: 1.0,
            max_steps: None,
        }
    }
}

/// Complete layout configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub forces: ForceConfig,
    pub run: RunConfig,
}

impl LayoutConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: LayoutConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Reject constants that would poison every position with NaN, and
    /// budgets that never run out
    ///
    /// An infinite duration is allowed only together with `max_steps`, and
    /// then means "until `max_steps`".
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.forces.k_repel.is_finite() {
            return Err(ConfigError::NonFinite { field: "k_repel" });
        }
        if !self.forces.k_attract.is_finite() {
            return Err(ConfigError::NonFinite { field: "k_attract" });
        }
        let duration = self.run.duration_seconds;
        if duration.is_nan() || (duration.is_infinite() && self.run.max_steps.is_none()) {
            return Err(ConfigError::NonFinite {
                field: "duration_seconds",
            });
        }
        Ok(())
    }
}
