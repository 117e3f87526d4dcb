//! Control service: the hexagonal core.
//!
//! [`ControlService`] exclusively owns the [`ThermostatState`] and is the
//! only path by which control writes and the periodic tick reach it.  All
//! I/O flows through port traits injected at call sites, making the entire
//! service testable with mock adapters.
//!
//! ```text
//!   control write ──▶ ┌────────────────────────┐ ──▶ ActuatorPort
//!                     │     ControlService      │
//!   periodic tick ──▶ │  validate · interlock   │ ──▶ NotifySink
//!                     │  physics · sequence     │ ──▶ EventSink
//!                     └────────────────────────┘
//! ```
//!
//! Everything runs on one cooperative loop; no call blocks or suspends.

use log::{debug, info, warn};

use crate::config::ThermostatConfig;
use crate::thermostat::{ActuatorKind, ActuatorMode, ControlRequest, Snapshot, ThermostatState};

use super::commands::{ControlOutcome, RejectReason};
use super::events::{AppEvent, Limit, Notification, StatusView};
use super::ports::{ActuatorPort, EventSink, NotifySink};

// ───────────────────────────────────────────────────────────────
// ControlService
// ───────────────────────────────────────────────────────────────

/// Request handling and tick orchestration for one thermostat.
pub struct ControlService {
    state: ThermostatState,
    /// Last notification sequence number handed out (0 = none yet).
    sequence: u64,
    tick_count: u64,
}

impl ControlService {
    /// Build the service around an already-initialised state record.
    pub fn new(state: ThermostatState) -> Self {
        Self {
            state,
            sequence: 0,
            tick_count: 0,
        }
    }

    /// Boot-time construction with a random startup temperature.
    pub fn from_seed(config: &ThermostatConfig, seed: u32) -> Self {
        Self::new(ThermostatState::from_config(config, seed))
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        let temperature = self.state.temperature();
        info!("Random temperature: {}", temperature);
        sink.emit(&AppEvent::Started { temperature });
    }

    // ── Control writes ────────────────────────────────────────

    /// Validate and apply one actuator-control write.
    ///
    /// `selector` picks the actuator (`r`/`g`/`b` or its name), `mode` is
    /// `on` or `off`.  State is committed before the actuator is driven, so
    /// a refused write never touches hardware.
    pub fn handle_control(
        &mut self,
        selector: Option<&str>,
        mode: Option<&str>,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> ControlOutcome {
        let request = match Self::parse_request(selector, mode) {
            Ok(request) => request,
            Err(reason) => return Self::reject(reason, sink),
        };

        if let Err(e) = self
            .state
            .set_actuator(request.actuator, request.desired.is_on())
        {
            warn!("Control write refused: {}", e);
            return Self::reject(e.into(), sink);
        }

        hw.drive(request.actuator, request.desired);
        info!("Actuator {} -> {}", request.actuator, request.desired);
        sink.emit(&AppEvent::ActuatorChanged {
            actuator: request.actuator,
            mode: request.desired,
        });
        ControlOutcome::Accepted(request)
    }

    // ── Reads ─────────────────────────────────────────────────

    pub fn read_status(&self) -> StatusView {
        StatusView::from(self.state.snapshot())
    }

    pub fn read_temperature(&self) -> i16 {
        self.state.temperature()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    // ── Periodic tick ─────────────────────────────────────────

    /// Advance the physics one step, then push the new temperature.
    ///
    /// The push always carries the temperature produced by this tick.
    pub fn on_tick(&mut self, notifier: &mut impl NotifySink, sink: &mut impl EventSink) {
        self.tick_count += 1;
        self.state.advance();
        self.sequence += 1;

        let temperature = self.state.temperature();
        debug!("TICK {} for /temperature: {}", self.sequence, temperature);

        notifier.push(Notification {
            sequence: self.sequence,
            temperature,
        });
        sink.emit(&AppEvent::Tick {
            sequence: self.sequence,
            temperature,
        });

        if let Some(limit) = self.pinned_limit() {
            sink.emit(&AppEvent::LimitReached { temperature, limit });
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Sequence number of the most recent notification (0 before the first tick).
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    fn parse_request(
        selector: Option<&str>,
        mode: Option<&str>,
    ) -> Result<ControlRequest, RejectReason> {
        let selector = selector.ok_or(RejectReason::MissingParameter)?;
        let actuator = ActuatorKind::from_token(selector).ok_or(RejectReason::UnknownActuator)?;
        let mode = mode.ok_or(RejectReason::MissingParameter)?;
        let desired = mode
            .parse::<ActuatorMode>()
            .map_err(|()| RejectReason::UnknownMode)?;
        Ok(ControlRequest { actuator, desired })
    }

    fn reject(reason: RejectReason, sink: &mut impl EventSink) -> ControlOutcome {
        warn!("Control write rejected: {}", reason);
        sink.emit(&AppEvent::ControlRejected(reason));
        ControlOutcome::Rejected(reason)
    }

    /// The bound an engaged actuator is pushing against, if any.
    fn pinned_limit(&self) -> Option<Limit> {
        let snap = self.state.snapshot();
        let bounds = self.state.bounds();
        if snap.heating && snap.temperature >= bounds.max {
            Some(Limit::Max)
        } else if snap.cooling && snap.temperature <= bounds.min {
            Some(Limit::Min)
        } else {
            None
        }
    }
}
