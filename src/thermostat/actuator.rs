//! Actuator identities, desired modes, and the interlock error.
//!
//! Each [`ActuatorKind`] maps 1:1 to a boolean flag in
//! [`ThermostatState`](super::ThermostatState) and to one LED drive channel.
//! Control requests name an actuator by colour (`r`/`g`/`b`, inherited from
//! the LED wiring) or by function name.

use core::fmt;
use core::str::FromStr;

/// The three HVAC actuators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActuatorKind {
    /// Heating element: red LED.
    Heating,
    /// Air conditioning: blue LED.
    Cooling,
    /// Fan: green LED.
    Ventilation,
}

impl ActuatorKind {
    pub const ALL: [Self; 3] = [Self::Heating, Self::Cooling, Self::Ventilation];

    /// Resolve a selector token (`r`, `g`, `b` or the function name).
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "r" | "heating" => Some(Self::Heating),
            "g" | "ventilation" => Some(Self::Ventilation),
            "b" | "cooling" | "conditioning" => Some(Self::Cooling),
            _ => None,
        }
    }

    /// The actuator that may never run together with this one, if any.
    pub const fn interlocked_with(self) -> Option<Self> {
        match self {
            Self::Heating => Some(Self::Cooling),
            Self::Cooling => Some(Self::Heating),
            Self::Ventilation => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Heating => "heating",
            Self::Cooling => "cooling",
            Self::Ventilation => "ventilation",
        }
    }
}

impl fmt::Display for ActuatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Desired actuator state carried by a control write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorMode {
    On,
    Off,
}

impl ActuatorMode {
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }
}

impl From<bool> for ActuatorMode {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

impl FromStr for ActuatorMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ActuatorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated control write, built by the control service and dropped
/// once handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlRequest {
    pub actuator: ActuatorKind,
    pub desired: ActuatorMode,
}

/// Rejection raised by [`ThermostatState::set_actuator`](super::ThermostatState::set_actuator).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// Enabling the actuator would run heating and cooling together.
    MutualExclusion {
        requested: ActuatorKind,
        active: ActuatorKind,
    },
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MutualExclusion { requested, active } => {
                write!(f, "cannot enable {requested} while {active} is active")
            }
        }
    }
}
