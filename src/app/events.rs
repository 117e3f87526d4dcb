//! Outbound application events and read views.
//!
//! The [`ControlService`](super::service::ControlService) emits
//! [`AppEvent`]s through the [`EventSink`](super::ports::EventSink) port and
//! pushes [`Notification`]s through the
//! [`NotifySink`](super::ports::NotifySink) port.  Adapters on the other side
//! decide what to do with them, e.g. log to serial or hand to the protocol engine.

use serde::Serialize;

use crate::thermostat::{ActuatorKind, ActuatorMode, Snapshot};

use super::commands::RejectReason;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The service is running (carries the random startup temperature).
    Started { temperature: i16 },

    /// An accepted control write changed (or re-affirmed) an actuator.
    ActuatorChanged {
        actuator: ActuatorKind,
        mode: ActuatorMode,
    },

    /// A control write was refused.
    ControlRejected(RejectReason),

    /// One periodic tick completed.
    Tick { sequence: u64, temperature: i16 },

    /// An engaged actuator is pinned against a clamp bound.
    LimitReached { temperature: i16, limit: Limit },
}

/// Which clamp bound was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Min,
    Max,
}

/// Temperature push to observers, tagged for ordering/duplicate detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    /// Strictly increasing, starts at 1.
    pub sequence: u64,
    pub temperature: i16,
}

/// Body of the `status` resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub heating: u8,
    pub conditioning: u8,
    pub ventilation: u8,
}

impl From<Snapshot> for StatusView {
    fn from(s: Snapshot) -> Self {
        Self {
            heating: u8::from(s.heating),
            conditioning: u8::from(s.cooling),
            ventilation: u8::from(s.ventilation),
        }
    }
}
