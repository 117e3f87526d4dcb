//! Mock adapters for integration tests.
//!
//! Record every drive call, notification and event so tests can assert on
//! the full history without touching real GPIO or a protocol engine.

use thermostat::app::events::{AppEvent, Notification};
use thermostat::app::ports::{ActuatorPort, EventSink, NotifySink};
use thermostat::thermostat::{ActuatorKind, ActuatorMode};

// ── MockHardware ──────────────────────────────────────────────

#[derive(Default)]
pub struct MockHardware {
    pub calls: Vec<(ActuatorKind, ActuatorMode)>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_call(&self) -> Option<&(ActuatorKind, ActuatorMode)> {
        self.calls.last()
    }

    /// Level most recently driven for `kind` (off if never driven).
    pub fn is_on(&self, kind: ActuatorKind) -> bool {
        self.calls
            .iter()
            .rev()
            .find(|(k, _)| *k == kind)
            .is_some_and(|(_, mode)| mode.is_on())
    }
}

impl ActuatorPort for MockHardware {
    fn drive(&mut self, actuator: ActuatorKind, mode: ActuatorMode) {
        self.calls.push((actuator, mode));
    }
}

// ── MockNotifier ──────────────────────────────────────────────

#[derive(Default)]
pub struct MockNotifier {
    pub pushes: Vec<Notification>,
}

impl NotifySink for MockNotifier {
    fn push(&mut self, notification: Notification) {
        self.pushes.push(notification);
    }
}

// ── MockEventSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct MockEventSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl MockEventSink {
    pub fn has(&self, pred: impl Fn(&AppEvent) -> bool) -> bool {
        self.events.iter().any(pred)
    }
}

impl EventSink for MockEventSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
