//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::{AppEvent, Limit};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { temperature } => {
                info!("START | temperature={}", temperature);
            }
            AppEvent::ActuatorChanged { actuator, mode } => {
                info!("ACT   | {} -> {}", actuator, mode);
            }
            AppEvent::ControlRejected(reason) => {
                info!("REJECT| {}", reason);
            }
            AppEvent::Tick {
                sequence,
                temperature,
            } => {
                info!("TICK  | seq={} temperature={}", sequence, temperature);
            }
            AppEvent::LimitReached { temperature, limit } => {
                let which = match limit {
                    Limit::Min => "minimum",
                    Limit::Max => "maximum",
                };
                warn!("LIMIT | temperature {} pinned at {}", temperature, which);
            }
        }
    }
}
