//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the control rules for the thermostat: request
//! validation, the interlock, the periodic physics/notify tick and the
//! status views.  All interaction with hardware and the protocol engine
//! happens through **port traits** defined in [`ports`], keeping this layer
//! fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
