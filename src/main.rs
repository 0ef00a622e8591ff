//! LED subsystem firmware — main entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                    │
//! │                                                            │
//! │   LedHardware        LogEventSink        MonotonicClock    │
//! │   (LedPort)          (EventSink)         (timestamps)      │
//! │                                                            │
//! │   ─────────────── Port Trait Boundary ──────────────────   │
//! │                                                            │
//! │   ┌────────────────────────────────────────────────────┐   │
//! │   │   SharedLed ─▶ LedService (pure logic)             │   │
//! │   │   FSM · BlinkTimer · OutputReconciler              │   │
//! │   └────────────────────────────────────────────────────┘   │
//! │                                                            │
//! │   Looper (fixed-rate tick driver)                          │
//! └────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::Result;
use log::{info, warn};

use led_subsystem::adapters::hardware::LedHardware;
use led_subsystem::adapters::log_sink::LogEventSink;
use led_subsystem::adapters::time::MonotonicClock;
use led_subsystem::app::service::LedService;
use led_subsystem::app::shared::SharedLed;
use led_subsystem::config::{LedConfig, LedProfile};
use led_subsystem::looper::Looper;
use led_subsystem::status::StatusCode;

/// Ticks between dashboard snapshots.
const DASHBOARD_EVERY_TICKS: u32 = 100;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("LED subsystem v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = LedConfig::for_profile(LedProfile::Relay);
    if let Err(e) = config.validate() {
        warn!("Built-in LED config invalid: {}", e);
    }

    // ── 3. Hardware + controller ──────────────────────────────
    let hardware = LedHardware::acquire(config.profile);
    let led = SharedLed::new(LedService::new(&config, hardware, LogEventSink::new()));
    led.set_status(StatusCode::BlueYellowAlternating);

    // ── 4. Tick driver ────────────────────────────────────────
    let clock = MonotonicClock::new();
    let mut looper = Looper::new();
    if led.register_enabled_loops(&mut looper).is_none() {
        warn!("LED loop not registered; outputs stay idle");
    }
    looper.start(clock.now_secs());

    info!("System ready. Entering tick loop.");

    let interval = Duration::from_millis(config.loop_interval_ms as u64);
    let mut ticks: u32 = 0;
    loop {
        std::thread::sleep(interval);
        looper.tick(clock.now_secs());

        ticks = ticks.wrapping_add(1);
        if ticks % DASHBOARD_EVERY_TICKS == 0 {
            led.publish_dashboard();
        }
    }
}
