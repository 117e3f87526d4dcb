//! Actuator indicator LEDs.
//!
//! The reference board has no real HVAC relays; each actuator is shown on
//! one discrete LED:
//!
//! | LED   | Actuator     |
//! |-------|--------------|
//! | red   | heating      |
//! | green | ventilation  |
//! | blue  | cooling      |
//!
//! ## Dual-target design
//!
//! Generic over [`embedded_hal::digital::OutputPin`]: on ESP-IDF the pins
//! are `PinDriver`s, on host/test they are [`SimPin`]s that only remember
//! their level.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use log::warn;

use crate::thermostat::ActuatorKind;

pub struct ActuatorLeds<R, G, B> {
    red: R,
    green: G,
    blue: B,
    /// Last level written per actuator, indexed like [`ActuatorKind::ALL`].
    lit: [bool; 3],
}

impl<R: OutputPin, G: OutputPin, B: OutputPin> ActuatorLeds<R, G, B> {
    /// All LEDs are driven low on construction.
    pub fn new(red: R, green: G, blue: B) -> Self {
        let mut leds = Self {
            red,
            green,
            blue,
            lit: [false; 3],
        };
        leds.all_off();
        leds
    }

    /// Set one actuator LED.  A pin error is logged and the LED is
    /// reported as unchanged.
    pub fn set(&mut self, actuator: ActuatorKind, on: bool) {
        let result = match actuator {
            ActuatorKind::Heating => write_pin(&mut self.red, on),
            ActuatorKind::Ventilation => write_pin(&mut self.green, on),
            ActuatorKind::Cooling => write_pin(&mut self.blue, on),
        };
        match result {
            Ok(()) => self.lit[index(actuator)] = on,
            Err(()) => warn!("LED for {} did not switch {}", actuator, if on { "on" } else { "off" }),
        }
    }

    pub fn all_off(&mut self) {
        for kind in ActuatorKind::ALL {
            self.set(kind, false);
        }
    }

    pub fn is_lit(&self, actuator: ActuatorKind) -> bool {
        self.lit[index(actuator)]
    }
}

fn write_pin<P: OutputPin>(pin: &mut P, high: bool) -> Result<(), ()> {
    let res = if high { pin.set_high() } else { pin.set_low() };
    res.map_err(|_| ())
}

fn index(actuator: ActuatorKind) -> usize {
    match actuator {
        ActuatorKind::Heating => 0,
        ActuatorKind::Cooling => 1,
        ActuatorKind::Ventilation => 2,
    }
}

// ── Simulation pin ────────────────────────────────────────────

/// In-memory output pin for host builds and tests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimPin {
    high: bool,
}

impl SimPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_high(&self) -> bool {
        self.high
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        Ok(())
    }
}

/// LED bank on simulated pins.
pub type SimLeds = ActuatorLeds<SimPin, SimPin, SimPin>;

impl SimLeds {
    pub fn simulated() -> Self {
        Self::new(SimPin::new(), SimPin::new(), SimPin::new())
    }

    /// Pin levels as (red, green, blue).
    pub fn levels(&self) -> (bool, bool, bool) {
        (self.red.is_high(), self.green.is_high(), self.blue.is_high())
    }
}
