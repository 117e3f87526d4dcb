//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlService (domain)
//! ```
//!
//! Driven adapters (LED drive, notification push, event sinks, config
//! storage) implement these traits.  The
//! [`ControlService`](super::service::ControlService) consumes them via
//! generics, so the domain core never touches hardware or the protocol
//! engine directly.
//!
//! Drive and notify calls are fire-and-forget: they return nothing, and an
//! adapter that fails must log and carry on.

use crate::config::ThermostatConfig;
use crate::thermostat::{ActuatorKind, ActuatorMode};

use super::events::{AppEvent, Notification};

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Physical drive channel for the actuators (LEDs on the reference board).
///
/// Must be idempotent: driving an actuator to the state it already has is
/// harmless.
pub trait ActuatorPort {
    fn drive(&mut self, actuator: ActuatorKind, mode: ActuatorMode);
}

// ───────────────────────────────────────────────────────────────
// Notify port (driven adapter: domain → observers)
// ───────────────────────────────────────────────────────────────

/// Pushes the current temperature to every active subscriber.
///
/// Subscriber bookkeeping belongs to the protocol engine; the domain only
/// hands over the value and its sequence number.  Best-effort, no
/// acknowledgement.
pub trait NotifySink {
    fn push(&mut self, notification: Notification);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists thermostat configuration.
///
/// Implementations MUST validate before persisting and after loading;
/// invalid values are rejected with [`ConfigError::ValidationFailed`],
/// never silently clamped.
pub trait ConfigPort {
    /// Returns [`ConfigError::NotFound`] if nothing has been stored yet.
    fn load(&self) -> Result<ThermostatConfig, ConfigError>;

    fn save(&self, config: &ThermostatConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No config found in storage (first boot).
    NotFound,
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    ValidationFailed(&'static str),
    /// Underlying storage is full.
    StorageFull,
    /// Flash open/read/write failed.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::StorageFull => write!(f, "storage full"),
            Self::IoError => write!(f, "storage I/O error"),
        }
    }
}
