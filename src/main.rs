//! Smart Thermostat Firmware: main entry point
//!
//! Hexagonal architecture with a single event-driven control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter   LogEventSink   FlashConfigStore  Console    │
//! │  (ActuatorPort)    (EventSink)    (ConfigPort)      (requests) │
//! │  ChannelNotifySink MonotonicClock entropy                      │
//! │  (NotifySink)                                                  │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │           ControlService (pure logic)                  │    │
//! │  │  ThermostatState · interlock · physics · sequence      │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  RestEngine (resource dispatch) · TickTimer (periodic tick)    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use std::time::Duration;

use anyhow::Result;
use esp_idf_svc::hal::gpio::PinDriver;
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use log::{info, warn};

use thermostat::adapters::config_store::FlashConfigStore;
use thermostat::adapters::console;
use thermostat::adapters::entropy;
use thermostat::adapters::hardware::HardwareAdapter;
use thermostat::adapters::log_sink::LogEventSink;
use thermostat::adapters::notify::{ChannelNotifySink, LogNotifySink};
use thermostat::adapters::time::MonotonicClock;
use thermostat::app::ports::{ConfigError, ConfigPort};
use thermostat::app::service::ControlService;
use thermostat::config::{DeploymentProfile, ThermostatConfig};
use thermostat::drivers::led::ActuatorLeds;
use thermostat::drivers::tick_timer::TickTimer;
use thermostat::events::{self, Event, push_event};
use thermostat::rest::channels::{NOTIFY_CHANNEL, REQUEST_CHANNEL, RESPONSE_CHANNEL};
use thermostat::rest::engine::RestEngine;

/// Sleep between control loop passes.
const LOOP_SLICE_MS: u64 = 10;

/// Preset used when no configuration has been stored yet.
fn build_profile() -> DeploymentProfile {
    let name = option_env!("THERMOSTAT_PROFILE").unwrap_or("standard");
    match name.parse() {
        Ok(profile) => profile,
        Err(e) => {
            warn!("THERMOSTAT_PROFILE '{}': {}, using standard", name, e);
            DeploymentProfile::Standard
        }
    }
}

fn load_config(store: Option<&FlashConfigStore>) -> ThermostatConfig {
    let profile = build_profile();
    let Some(store) = store else {
        info!("Config: profile {} (no persistent store)", profile);
        return profile.config();
    };
    match store.load() {
        Ok(cfg) => {
            info!("Config loaded from NVS");
            cfg
        }
        Err(ConfigError::NotFound) => {
            info!("Config: first boot, storing profile {}", profile);
            let cfg = profile.config();
            if let Err(e) = store.save(&cfg) {
                warn!("Config save failed ({})", e);
            }
            cfg
        }
        Err(e) => {
            warn!("Config load failed ({}), using profile {}", e, profile);
            profile.config()
        }
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Smart Thermostat v{}             ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let peripherals = Peripherals::take()?;

    // ── 2. Load config from NVS (or the build profile) ────────
    let store = match EspDefaultNvsPartition::take()
        .map_err(|e| {
            warn!("NVS partition unavailable ({})", e);
            ConfigError::IoError
        })
        .and_then(FlashConfigStore::new)
    {
        Ok(store) => Some(store),
        Err(e) => {
            warn!("Config store init failed ({}), running without persistence", e);
            None
        }
    };
    let config = load_config(store.as_ref());
    config.validate().map_err(thermostat::error::Error::from)?;

    info!(
        "Bounds {}..={}, tick every {} s, resources {:?}",
        config.min_temp, config.max_temp, config.tick_period_secs, config.resources
    );

    // ── 3. Construct adapters ─────────────────────────────────
    // red = heating (GPIO4), green = ventilation (GPIO5), blue = cooling (GPIO6)
    let leds = ActuatorLeds::new(
        PinDriver::output(peripherals.pins.gpio4)?,
        PinDriver::output(peripherals.pins.gpio5)?,
        PinDriver::output(peripherals.pins.gpio6)?,
    );
    let mut hw = HardwareAdapter::new(leds);
    hw.all_off();
    let mut log_sink = LogEventSink::new();
    let mut channel_notifier = ChannelNotifySink::new(&NOTIFY_CHANNEL);
    let mut log_notifier = LogNotifySink;
    let clock = MonotonicClock::new();

    // ── 4. Construct the control service ──────────────────────
    let observable = config.resources.is_observable();
    let mut engine = RestEngine::new(config.resources);
    let mut timer = TickTimer::new(config.tick_period_ms(), clock.uptime_us());
    let mut service = ControlService::from_seed(&config, entropy::boot_seed());
    service.start(&mut log_sink);

    // ── 5. Request front end ──────────────────────────────────
    let _console = console::spawn(&REQUEST_CHANNEL)?;

    info!("System ready. Entering event loop.");

    // ── 6. Event loop ─────────────────────────────────────────
    loop {
        if timer.poll(clock.uptime_us()) && !push_event(Event::PeriodicTick) {
            warn!("Event queue full, tick dropped");
        }

        events::drain_events(|event| match event {
            Event::PeriodicTick => {
                if observable {
                    service.on_tick(&mut channel_notifier, &mut log_sink);
                } else {
                    service.on_tick(&mut log_notifier, &mut log_sink);
                }
            }
            Event::RequestReceived => {
                engine.poll(
                    &REQUEST_CHANNEL,
                    &RESPONSE_CHANNEL,
                    &mut service,
                    &mut hw,
                    &mut log_sink,
                );
            }
        });

        console::report(&RESPONSE_CHANNEL, &NOTIFY_CHANNEL);

        std::thread::sleep(Duration::from_millis(LOOP_SLICE_MS));
    }
}
