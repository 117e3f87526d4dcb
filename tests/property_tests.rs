//! Property tests for the thermostat invariants.
//!
//! Runs on host (x86_64) only; proptest is not available for ESP32 targets.
//! On ESP32, these tests are compiled out.

#![cfg(not(target_os = "espidf"))]

use proptest::prelude::*;

use thermostat::app::events::{AppEvent, Notification};
use thermostat::app::ports::{ActuatorPort, EventSink, NotifySink};
use thermostat::app::service::ControlService;
use thermostat::config::ThermostatConfig;
use thermostat::rest::query;
use thermostat::thermostat::{ActuatorKind, ActuatorMode, TempBounds, ThermostatState};

// ── Recording adapters ────────────────────────────────────────

#[derive(Default)]
struct Record {
    drives: Vec<(ActuatorKind, ActuatorMode)>,
    pushes: Vec<Notification>,
    events: Vec<AppEvent>,
}

struct Hw<'a>(&'a mut Vec<(ActuatorKind, ActuatorMode)>);
impl ActuatorPort for Hw<'_> {
    fn drive(&mut self, a: ActuatorKind, m: ActuatorMode) {
        self.0.push((a, m));
    }
}

struct Push<'a>(&'a mut Vec<Notification>);
impl NotifySink for Push<'_> {
    fn push(&mut self, n: Notification) {
        self.0.push(n);
    }
}

struct Sink<'a>(&'a mut Vec<AppEvent>);
impl EventSink for Sink<'_> {
    fn emit(&mut self, e: &AppEvent) {
        self.0.push(e.clone());
    }
}

// ── Operation generator ───────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Control(&'static str, &'static str),
    Tick,
}

fn arb_op() -> impl Strategy<Value = Op> {
    let selector = prop_oneof![
        Just("r"),
        Just("g"),
        Just("b"),
        Just("heating"),
        Just("cooling"),
        Just("x"),
        Just(""),
    ];
    let mode = prop_oneof![Just("on"), Just("off"), Just("toggle"), Just("")];
    prop_oneof![
        3 => (selector, mode).prop_map(|(s, m)| Op::Control(s, m)),
        2 => Just(Op::Tick),
    ]
}

fn run(config: &ThermostatConfig, start: i16, ops: &[Op], rec: &mut Record) -> ControlService {
    let state = ThermostatState::new(config.bounds(), start);
    let mut svc = ControlService::new(state);
    for op in ops {
        match op {
            Op::Control(sel, mode) => {
                let sel = (!sel.is_empty()).then_some(*sel);
                let mode = (!mode.is_empty()).then_some(*mode);
                svc.handle_control(sel, mode, &mut Hw(&mut rec.drives), &mut Sink(&mut rec.events));
            }
            Op::Tick => svc.on_tick(&mut Push(&mut rec.pushes), &mut Sink(&mut rec.events)),
        }
        let snap = svc.snapshot();
        let bounds = config.bounds();
        assert!(!(snap.heating && snap.cooling), "heating and cooling both on");
        assert!(
            (bounds.min..=bounds.max).contains(&snap.temperature),
            "temperature {} escaped {:?}",
            snap.temperature,
            bounds
        );
    }
    svc
}

proptest! {
    /// Heating and cooling are never both engaged, and the temperature
    /// never leaves its bounds, whatever the request/tick interleaving.
    #[test]
    fn invariants_hold_for_any_sequence(
        start in -100i16..200,
        ops in proptest::collection::vec(arb_op(), 0..=80),
    ) {
        let config = ThermostatConfig::default();
        let mut rec = Record::default();
        run(&config, start, &ops, &mut rec);
    }

    /// Identical inputs give identical histories.
    #[test]
    fn deterministic(
        start in 1i16..=50,
        ops in proptest::collection::vec(arb_op(), 0..=60),
    ) {
        let config = ThermostatConfig::default();
        let (mut a, mut b) = (Record::default(), Record::default());
        let sa = run(&config, start, &ops, &mut a);
        let sb = run(&config, start, &ops, &mut b);
        prop_assert_eq!(sa.snapshot(), sb.snapshot());
        prop_assert_eq!(a.drives, b.drives);
        prop_assert_eq!(a.pushes, b.pushes);
        prop_assert_eq!(a.events, b.events);
    }

    /// Every push is numbered one higher than the last and carries the
    /// temperature the tick produced.
    #[test]
    fn notifications_are_gapless(
        ops in proptest::collection::vec(arb_op(), 0..=60),
    ) {
        let config = ThermostatConfig::default();
        let mut rec = Record::default();
        let svc = run(&config, 25, &ops, &mut rec);
        let ticks = ops.iter().filter(|o| matches!(o, Op::Tick)).count();
        prop_assert_eq!(rec.pushes.len(), ticks);
        for (i, n) in rec.pushes.iter().enumerate() {
            prop_assert_eq!(n.sequence, i as u64 + 1);
        }
        if let Some(last) = rec.pushes.last() {
            prop_assert_eq!(last.temperature, svc.read_temperature());
        }
    }

    /// Repeating an accepted write leaves the record unchanged.
    #[test]
    fn accepted_writes_are_idempotent(
        ops in proptest::collection::vec(arb_op(), 0..=40),
        sel in prop_oneof![Just("r"), Just("g"), Just("b")],
        mode in prop_oneof![Just("on"), Just("off")],
    ) {
        let config = ThermostatConfig::default();
        let mut rec = Record::default();
        let mut svc = run(&config, 20, &ops, &mut rec);
        let first = svc.handle_control(
            Some(sel), Some(mode), &mut Hw(&mut rec.drives), &mut Sink(&mut rec.events),
        );
        let after_first = svc.snapshot();
        let second = svc.handle_control(
            Some(sel), Some(mode), &mut Hw(&mut rec.drives), &mut Sink(&mut rec.events),
        );
        prop_assert_eq!(first, second);
        prop_assert_eq!(svc.snapshot(), after_first);
    }

    /// Clamping is total: any start value lands inside the bounds, even
    /// when they are given inverted.
    #[test]
    fn construction_clamps(start in any::<i16>(), a in any::<i16>(), b in any::<i16>()) {
        let state = ThermostatState::new(TempBounds { min: a, max: b }, start);
        let (lo, hi) = (a.min(b), a.max(b));
        prop_assert_eq!(state.bounds(), TempBounds { min: lo, max: hi });
        prop_assert!((lo..=hi).contains(&state.temperature()));
    }

    /// The startup draw is `base + seed % span` for any span, including
    /// ones wider than `i16::MAX`.
    #[test]
    fn startup_draw_is_exact(
        base in -32_000i16..-10_000,
        span in 1u16..=40_000,
        seed in any::<u32>(),
    ) {
        let config = ThermostatConfig {
            min_temp: base,
            max_temp: i16::MAX,
            initial_temp_base: base,
            rand_span: span,
            ..Default::default()
        };
        prop_assert!(config.validate().is_ok());
        let expected = i32::from(base) + (seed % u32::from(span)) as i32;
        let state = ThermostatState::from_config(&config, seed);
        prop_assert_eq!(i32::from(state.temperature()), expected);
    }

    /// Query lookup never panics and only returns non-empty values.
    #[test]
    fn query_lookup_is_total(encoded in "[a-z=&]{0,40}", name in "[a-z]{1,6}") {
        if let Some(v) = query::variable(&encoded, &name) {
            prop_assert!(!v.is_empty());
        }
    }
}
