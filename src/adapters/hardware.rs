//! Hardware adapter: bridges the LED bank to the [`ActuatorPort`].
//!
//! This is the only module in the system that drives physical outputs.
//! On non-espidf targets it runs over [`SimPin`](crate::drivers::led::SimPin)s.

use embedded_hal::digital::OutputPin;
use log::debug;

use crate::app::ports::ActuatorPort;
use crate::drivers::led::ActuatorLeds;
use crate::thermostat::{ActuatorKind, ActuatorMode};

/// Concrete adapter that puts the actuator LEDs behind the port trait.
pub struct HardwareAdapter<R, G, B> {
    leds: ActuatorLeds<R, G, B>,
}

impl<R: OutputPin, G: OutputPin, B: OutputPin> HardwareAdapter<R, G, B> {
    pub fn new(leds: ActuatorLeds<R, G, B>) -> Self {
        Self { leds }
    }

    /// Drive every output low.
    pub fn all_off(&mut self) {
        self.leds.all_off();
    }

    pub fn leds(&self) -> &ActuatorLeds<R, G, B> {
        &self.leds
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<R: OutputPin, G: OutputPin, B: OutputPin> ActuatorPort for HardwareAdapter<R, G, B> {
    fn drive(&mut self, actuator: ActuatorKind, mode: ActuatorMode) {
        debug!("drive {} {}", actuator, mode);
        self.leds.set(actuator, mode.is_on());
    }
}
