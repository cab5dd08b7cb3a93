//! Simulation configuration.
//!
//! The rule knobs select between the behaviours a cargo simulation can
//! reasonably take on arrival, voyage fuel and heavy-class limits. Defaults
//! keep cargo onboard, charge fuel for cargo, and count Refrigerated and
//! Liquid containers against the heavy limit as well as their own.

use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Policies
// ---------------------------------------------------------------------------

/// What happens to onboard containers when a ship reaches its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrivalPolicy {
    /// Containers stay onboard until explicitly unloaded.
    #[default]
    KeepOnboard,
    /// Every onboard container is moved onto the destination quay.
    DischargeAll,
}

/// Which burn rates a voyage is charged for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelPolicy {
    /// Hull rate plus the consumption of every onboard container.
    #[default]
    HullAndCargo,
    /// Hull rate only, scaled by
    /// [`CONSUMPTION_SCALE`](crate::container::CONSUMPTION_SCALE).
    HullOnly,
}

/// How the heavy limit interacts with the refrigerated and liquid limits.
///
/// Under both policies every heavy-class container onboard counts towards
/// the heavy tally. They differ in which loads are checked against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeavyLimitPolicy {
    /// Loading any heavy-class container checks the heavy limit, and
    /// Refrigerated and Liquid also check their own.
    #[default]
    Cumulative,
    /// Refrigerated and Liquid loads check only their own limit; a plain
    /// Heavy load checks the heavy limit against the whole heavy class.
    Exclusive,
}

/// Rules a ship applies when loading and sailing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub arrival: ArrivalPolicy,
    pub voyage_fuel: FuelPolicy,
    pub heavy_limits: HeavyLimitPolicy,
    /// Slack allowed when comparing available fuel against the voyage cost.
    pub fuel_epsilon: f64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            arrival: ArrivalPolicy::default(),
            voyage_fuel: FuelPolicy::default(),
            heavy_limits: HeavyLimitPolicy::default(),
            fuel_epsilon: 1e-9,
        }
    }
}

// ---------------------------------------------------------------------------
// SimConfig
// ---------------------------------------------------------------------------

/// Top-level configuration for a [`Simulation`](crate::sim::Simulation).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Containers created without a kind are Basic up to this weight,
    /// Heavy above it.
    pub heavy_weight_threshold: u32,
    pub rules: Rules,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            heavy_weight_threshold: 3000,
            rules: Rules::default(),
        }
    }
}

/// Errors raised while loading or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("fuel_epsilon must be finite and non-negative, got {0}")]
    InvalidEpsilon(f64),
}

impl SimConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let eps = self.rules.fuel_epsilon;
        if !eps.is_finite() || eps < 0.0 {
            return Err(ConfigError::InvalidEpsilon(eps));
        }
        Ok(())
    }
}
