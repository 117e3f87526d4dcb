//! End-to-end control loop on the host: console lines in, LED levels,
//! responses and temperature pushes out.

use embassy_sync::channel::Channel;

use thermostat::adapters::console::Console;
use thermostat::adapters::hardware::HardwareAdapter;
use thermostat::adapters::notify::ChannelNotifySink;
use thermostat::app::service::ControlService;
use thermostat::config::ThermostatConfig;
use thermostat::drivers::led::SimLeds;
use thermostat::drivers::tick_timer::TickTimer;
use thermostat::rest::ResponseCode;
use thermostat::rest::channels::{NotifyChannel, RequestChannel, ResponseChannel};
use thermostat::rest::engine::RestEngine;
use thermostat::thermostat::ThermostatState;

use super::mock_hw::MockEventSink;

const SEC: u64 = 1_000_000;

struct Loop {
    requests: RequestChannel,
    responses: ResponseChannel,
    notifications: NotifyChannel,
}

impl Loop {
    fn new() -> Self {
        Self {
            requests: Channel::new(),
            responses: Channel::new(),
            notifications: Channel::new(),
        }
    }
}

#[test]
fn console_requests_drive_leds_and_ticks_push_temperature() {
    let ch = Loop::new();
    let config = ThermostatConfig::default();
    let state = ThermostatState::new(config.bounds(), 15);
    let mut engine = RestEngine::new(config.resources);
    let mut timer = TickTimer::new(config.tick_period_ms(), 0);
    let mut svc = ControlService::new(state);

    let mut hw = HardwareAdapter::new(SimLeds::simulated());
    let mut notifier = ChannelNotifySink::new(&ch.notifications);
    let mut ev = MockEventSink::default();
    let mut console = Console::with_wake(&ch.requests, |_| true);

    console.submit("PUT leds?color=r mode=on").unwrap();
    console.submit("PUT leds?color=g mode=on").unwrap();
    console.submit("PUT leds?color=b mode=on").unwrap();
    engine.poll(&ch.requests, &ch.responses, &mut svc, &mut hw, &mut ev);

    let codes: Vec<_> = core::iter::from_fn(|| ch.responses.try_receive().ok())
        .map(|r| (r.token, r.response.code))
        .collect();
    assert_eq!(
        codes,
        vec![
            (1, ResponseCode::Changed),
            (2, ResponseCode::Changed),
            (3, ResponseCode::NotAcceptable),
        ]
    );
    assert_eq!(hw.leds().levels(), (true, true, false));

    for now in [10 * SEC, 20 * SEC, 30 * SEC, 40 * SEC] {
        if timer.poll(now) {
            svc.on_tick(&mut notifier, &mut ev);
        }
    }

    let pushes: Vec<_> = core::iter::from_fn(|| ch.notifications.try_receive().ok())
        .map(|n| (n.sequence, n.temperature))
        .collect();
    assert_eq!(pushes, vec![(1, 17), (2, 19)]);
    assert_eq!(svc.read_temperature(), 19);
    assert_eq!(notifier.dropped(), 0);
}

#[test]
fn switching_from_heating_to_cooling_requires_release() {
    let ch = Loop::new();
    let config = ThermostatConfig::default();
    let state = ThermostatState::new(config.bounds(), 30);
    let mut engine = RestEngine::new(config.resources);
    let mut svc = ControlService::new(state);
    let mut hw = HardwareAdapter::new(SimLeds::simulated());
    let mut ev = MockEventSink::default();
    let mut console = Console::with_wake(&ch.requests, |_| true);

    console.submit("POST leds?color=heating mode=on").unwrap();
    console.submit("POST leds?color=cooling mode=on").unwrap();
    console.submit("POST leds?color=heating mode=off").unwrap();
    console.submit("POST leds?color=cooling mode=on").unwrap();
    engine.poll(&ch.requests, &ch.responses, &mut svc, &mut hw, &mut ev);

    let payloads: Vec<_> = core::iter::from_fn(|| ch.responses.try_receive().ok())
        .map(|r| r.response.payload.as_str().to_owned())
        .collect();
    assert_eq!(payloads, ["mode=on", "KO", "mode=off", "mode=on"]);
    assert_eq!(hw.leds().levels(), (false, false, true));

    let snap = svc.snapshot();
    assert!(snap.cooling && !snap.heating);
}
