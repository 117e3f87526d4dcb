//! Thermostat state model and physics step.
//!
//! [`ThermostatState`] is the single authoritative record of the three
//! actuator flags and the simulated temperature.  Two invariants hold at
//! every observable instant:
//!
//! - heating and cooling are never both engaged;
//! - `min <= temperature <= max` for the configured bounds.
//!
//! The flags are private: [`ThermostatState::set_actuator`] is the only
//! writer and enforces the heating/cooling interlock itself.

pub mod actuator;

pub use actuator::{ActuatorError, ActuatorKind, ActuatorMode, ControlRequest};

use crate::config::ThermostatConfig;

/// Inclusive clamp bounds for the simulated temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempBounds {
    pub min: i16,
    pub max: i16,
}

impl TempBounds {
    /// Same bounds with `min <= max`; inverted input is swapped.
    pub fn ordered(self) -> Self {
        if self.min <= self.max {
            self
        } else {
            Self {
                min: self.max,
                max: self.min,
            }
        }
    }

    /// Never panics, even on inverted bounds.
    pub fn clamp(self, value: i16) -> i16 {
        let b = self.ordered();
        value.max(b.min).min(b.max)
    }
}

/// Read-only copy of the thermostat record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub heating: bool,
    pub cooling: bool,
    pub ventilation: bool,
    pub temperature: i16,
}

impl Snapshot {
    /// Flag for a single actuator.
    pub fn is_on(&self, kind: ActuatorKind) -> bool {
        match kind {
            ActuatorKind::Heating => self.heating,
            ActuatorKind::Cooling => self.cooling,
            ActuatorKind::Ventilation => self.ventilation,
        }
    }
}

/// Actuator flags plus the bounded simulated temperature.
#[derive(Debug, Clone)]
pub struct ThermostatState {
    heating: bool,
    cooling: bool,
    ventilation: bool,
    temperature: i16,
    bounds: TempBounds,
}

impl ThermostatState {
    /// All actuators off; `temperature` is clamped into `bounds`.
    /// Inverted bounds are swapped rather than rejected.
    pub fn new(bounds: TempBounds, temperature: i16) -> Self {
        let bounds = bounds.ordered();
        Self {
            heating: false,
            cooling: false,
            ventilation: false,
            temperature: bounds.clamp(temperature),
            bounds,
        }
    }

    /// Boot-time construction: the temperature is drawn from
    /// `[initial_temp_base, initial_temp_base + rand_span)` using `seed`.
    pub fn from_config(config: &ThermostatConfig, seed: u32) -> Self {
        let span = u32::from(config.rand_span.max(1));
        // seed % span < 2^16, so the offset always fits.
        let offset = i32::try_from(seed % span).unwrap_or(0);
        let start = i32::from(config.initial_temp_base) + offset;
        let start = i16::try_from(start).unwrap_or(config.max_temp);
        Self::new(config.bounds(), start)
    }

    /// Engage or release one actuator.
    ///
    /// Turning an actuator off always succeeds.  Turning heating on while
    /// cooling runs (or the reverse) is refused and leaves the record
    /// untouched.
    pub fn set_actuator(&mut self, kind: ActuatorKind, desired: bool) -> Result<(), ActuatorError> {
        if desired {
            if let Some(other) = kind.interlocked_with() {
                if *self.flag_mut(other) {
                    return Err(ActuatorError::MutualExclusion {
                        requested: kind,
                        active: other,
                    });
                }
            }
        }
        *self.flag_mut(kind) = desired;
        Ok(())
    }

    /// One physics step.
    ///
    /// Ventilation doubles the heating/cooling rate and has no effect on
    /// its own.  The result is clamped to the bounds, never wrapped.
    pub fn advance(&mut self) {
        let multiplier: i16 = if self.ventilation { 2 } else { 1 };

        if self.heating && self.temperature < self.bounds.max {
            self.temperature = self.temperature.saturating_add(multiplier).min(self.bounds.max);
        }

        if self.cooling && self.temperature > self.bounds.min {
            self.temperature = self.temperature.saturating_sub(multiplier).max(self.bounds.min);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            heating: self.heating,
            cooling: self.cooling,
            ventilation: self.ventilation,
            temperature: self.temperature,
        }
    }

    pub fn temperature(&self) -> i16 {
        self.temperature
    }

    pub fn bounds(&self) -> TempBounds {
        self.bounds
    }

    fn flag_mut(&mut self, kind: ActuatorKind) -> &mut bool {
        match kind {
            ActuatorKind::Heating => &mut self.heating,
            ActuatorKind::Cooling => &mut self.cooling,
            ActuatorKind::Ventilation => &mut self.ventilation,
        }
    }
}
