//! Thermostat configuration parameters
//!
//! Clamp bounds, tick period and the active resource set differ between
//! deployments, so they live here rather than in constants.  Presets for
//! the known deployments are available through [`DeploymentProfile`].

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::rest::resources::ResourceSet;
use crate::thermostat::TempBounds;

/// Core thermostat configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThermostatConfig {
    // --- Simulation bounds ---
    /// Lowest temperature cooling can reach
    pub min_temp: i16,
    /// Highest temperature heating can reach
    pub max_temp: i16,

    // --- Startup draw ---
    /// Lower end of the random startup temperature
    pub initial_temp_base: i16,
    /// Width of the random startup range
    pub rand_span: u16,

    // --- Timing ---
    /// Period of the physics/notify tick (seconds)
    pub tick_period_secs: u32,

    // --- Resources ---
    pub resources: ResourceSet,
}

impl Default for ThermostatConfig {
    fn default() -> Self {
        DeploymentProfile::Standard.config()
    }
}

impl ThermostatConfig {
    pub fn bounds(&self) -> TempBounds {
        TempBounds {
            min: self.min_temp,
            max: self.max_temp,
        }
    }

    pub fn tick_period_ms(&self) -> u64 {
        u64::from(self.tick_period_secs) * 1000
    }

    /// Range-check every field.  Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_temp >= self.max_temp {
            return Err(ConfigError::ValidationFailed(
                "min_temp must be below max_temp",
            ));
        }
        if self.rand_span == 0 {
            return Err(ConfigError::ValidationFailed("rand_span must be at least 1"));
        }
        let draw_top = i32::from(self.initial_temp_base) + i32::from(self.rand_span) - 1;
        if self.initial_temp_base < self.min_temp || draw_top > i32::from(self.max_temp) {
            return Err(ConfigError::ValidationFailed(
                "startup temperature range must lie within min_temp..=max_temp",
            ));
        }
        if !(1..=3600).contains(&self.tick_period_secs) {
            return Err(ConfigError::ValidationFailed(
                "tick_period_secs must be 1–3600",
            ));
        }
        if self.resources.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "at least one resource must be active",
            ));
        }
        Ok(())
    }
}

/// Known deployment presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentProfile {
    /// 1..50, 20 s tick.
    Standard,
    /// Narrow residential band, 10..30, 30 s tick.
    Comfort,
    /// Wide band, 1..60, 5 s tick for dashboards that want fast updates.
    Extended,
    /// 1..50, 130 s tick.
    LowPower,
}

impl DeploymentProfile {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Comfort => "comfort",
            Self::Extended => "extended",
            Self::LowPower => "lowpower",
        }
    }

    pub fn config(self) -> ThermostatConfig {
        let (min_temp, max_temp, tick_period_secs) = match self {
            Self::Standard => (1, 50, 20),
            Self::Comfort => (10, 30, 30),
            Self::Extended => (1, 60, 5),
            Self::LowPower => (1, 50, 130),
        };
        ThermostatConfig {
            min_temp,
            max_temp,
            initial_temp_base: 10,
            rand_span: 20,
            tick_period_secs,
            resources: ResourceSet::default(),
        }
    }
}

impl FromStr for DeploymentProfile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "comfort" => Ok(Self::Comfort),
            "extended" => Ok(Self::Extended),
            "lowpower" => Ok(Self::LowPower),
            _ => Err(ConfigError::ValidationFailed("unknown deployment profile")),
        }
    }
}

impl fmt::Display for DeploymentProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
