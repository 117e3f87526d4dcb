//! Control write outcomes.
//!
//! The [`ControlService`](super::service::ControlService) answers every
//! actuator-control write with a [`ControlOutcome`].  Rejections carry a
//! [`RejectReason`]; the resource layer turns any rejection into the same
//! `KO` failure payload.

use core::fmt;

use crate::thermostat::{ActuatorError, ControlRequest};

/// Why a control write was refused.  None of these are fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The selector names no known actuator.
    UnknownActuator,
    /// The mode is neither `on` nor `off`.
    UnknownMode,
    /// Enabling the actuator would run heating and cooling together.
    MutualExclusionViolated,
    /// Selector or mode absent from the request.
    MissingParameter,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownActuator => write!(f, "unknown actuator"),
            Self::UnknownMode => write!(f, "unknown mode"),
            Self::MutualExclusionViolated => write!(f, "heating/cooling interlock"),
            Self::MissingParameter => write!(f, "missing parameter"),
        }
    }
}

impl From<ActuatorError> for RejectReason {
    fn from(e: ActuatorError) -> Self {
        match e {
            ActuatorError::MutualExclusion { .. } => Self::MutualExclusionViolated,
        }
    }
}

/// Result of [`ControlService::handle_control`](super::service::ControlService::handle_control).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlOutcome {
    /// State committed and actuator driven.
    Accepted(ControlRequest),
    /// Nothing changed.
    Rejected(RejectReason),
}

impl ControlOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}
