//! Fuzz target: console line → `Request` → `RestEngine::handle`
//!
//! Feeds arbitrary text through the request parser and the resource
//! dispatcher, interleaved with ticks, against simulated LEDs.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - Heating and cooling are never both engaged, in the record or on the LEDs
//! - Temperature stays within the configured bounds
//! - A rejected control write always answers 4.06 `KO`
//!
//! cargo fuzz run fuzz_request_dispatch

#![no_main]

use libfuzzer_sys::fuzz_target;
use thermostat::adapters::console::parse_line;
use thermostat::adapters::hardware::HardwareAdapter;
use thermostat::adapters::log_sink::LogEventSink;
use thermostat::adapters::notify::LogNotifySink;
use thermostat::app::service::ControlService;
use thermostat::config::ThermostatConfig;
use thermostat::drivers::led::SimLeds;
use thermostat::rest::ResponseCode;
use thermostat::rest::engine::RestEngine;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };

    let config = ThermostatConfig::default();
    let bounds = config.bounds();
    let mut engine = RestEngine::new(config.resources);
    let seed = data.iter().fold(0u32, |acc, b| acc.rotate_left(5) ^ u32::from(*b));
    let mut svc = ControlService::from_seed(&config, seed);
    let mut hw = HardwareAdapter::new(SimLeds::simulated());
    let mut sink = LogEventSink::new();
    let mut notify = LogNotifySink;

    for line in text.lines() {
        // A bare "." line stands for one tick.
        if line == "." {
            svc.on_tick(&mut notify, &mut sink);
        } else if let Ok(Some(request)) = parse_line(line) {
            let resp = engine.handle(&request, &mut svc, &mut hw, &mut sink);
            if resp.code == ResponseCode::NotAcceptable {
                assert_eq!(resp.payload.as_str(), "KO");
            }
        }

        let snap = svc.snapshot();
        assert!(!(snap.heating && snap.cooling));
        assert!((bounds.min..=bounds.max).contains(&snap.temperature));
        let (red, _, blue) = hw.leds().levels();
        assert!(!(red && blue));
    }
});
