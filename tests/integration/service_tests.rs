//! Integration tests for the LedService → FSM → reconciler → port chain.
//!
//! Timestamps are fed explicitly, so every scenario is deterministic.

use led_subsystem::app::commands::LedCommand;
use led_subsystem::app::events::LedEvent;
use led_subsystem::app::ports::Channel;
use led_subsystem::app::service::LedService;
use led_subsystem::blink::BlinkConfig;
use led_subsystem::config::{LedConfig, LedProfile};
use led_subsystem::drivers::hw_init::HwInitError;
use led_subsystem::error::Error;
use led_subsystem::fsm::{SystemState, WantedState};
use led_subsystem::status::StatusCode;

use crate::mock_hw::{MockLedPort, RecordingSink};

type Svc = LedService<MockLedPort, RecordingSink>;

fn make(profile: LedProfile) -> Svc {
    let config = LedConfig::for_profile(profile);
    let mut svc = LedService::new(
        &config,
        Ok(MockLedPort::for_profile(profile)),
        RecordingSink::new(),
    );
    svc.on_start(0.0);
    svc
}

fn hw(svc: &Svc) -> &MockLedPort {
    svc.hardware().expect("initialized")
}

fn ts(i: u32) -> f64 {
    f64::from(i) * 0.05
}

// ── Construction ──────────────────────────────────────────────

#[test]
fn construction_forces_outputs_off_and_clears_display() {
    let svc = LedService::new(
        &LedConfig::default(),
        Ok(MockLedPort::for_profile(LedProfile::Relay)),
        RecordingSink::new(),
    );
    assert_eq!(
        svc.sink().events,
        vec![
            LedEvent::LevelChanged { channel: Channel::Driver, on: false },
            LedEvent::LevelChanged { channel: Channel::Lamp, on: false },
            LedEvent::StatusChanged(StatusCode::Off),
            LedEvent::Initialized(true),
        ]
    );
    assert_eq!(hw(&svc).status_frames(), vec![b"0".to_vec()]);
    assert!(hw(&svc).level_writes(Channel::Strip).is_empty());
}

#[test]
fn failed_acquisition_is_inert() {
    let mut svc: Svc = LedService::new(
        &LedConfig::default(),
        Err(HwInitError::GpioConfigFailed(-1).into()),
        RecordingSink::new(),
    );
    svc.on_start(0.0);
    svc.set_wanted_state(WantedState::FixedOn);
    svc.warn("ignored");
    svc.set_status(StatusCode::Red);
    svc.set_lamp(true);
    for i in 0..10 {
        svc.on_loop(ts(i));
    }
    svc.publish_dashboard();
    svc.on_stop(1.0);

    assert!(!svc.is_initialized());
    assert!(svc.hardware().is_none());
    assert_eq!(svc.sink().events, vec![LedEvent::Initialized(false)]);
    assert_eq!(svc.system_state(), SystemState::Off);
    assert_eq!(svc.status(), StatusCode::Off);
}

// ── Blink run ─────────────────────────────────────────────────

#[test]
fn blink_run_follows_square_wave_and_self_clears() {
    let mut svc = make(LedProfile::Relay);
    svc.set_wanted_state(WantedState::Blink);

    svc.on_loop(ts(0));
    assert_eq!(svc.system_state(), SystemState::Blinking);
    assert!(!svc.is_driver_on());

    for i in 1..=16 {
        svc.on_loop(ts(i));
        assert_eq!(svc.system_state(), SystemState::Blinking, "tick {i}");
        assert_eq!(svc.is_driver_on(), (i / 2) % 2 == 0, "tick {i}");
    }

    svc.on_loop(ts(17));
    assert_eq!(svc.system_state(), SystemState::Off);
    assert_eq!(svc.wanted_state(), WantedState::Off);
    assert!(!svc.is_driver_on());

    // One physical write per edge, starting from the construction write.
    assert_eq!(
        hw(&svc).level_writes(Channel::Driver),
        vec![false, true, false, true, false, true, false, true, false, true, false]
    );
    assert!(svc.sink().events.contains(&LedEvent::WantedChanged(WantedState::Off)));
}

#[test]
fn nan_timestamp_cannot_stall_blink_run() {
    let mut svc = make(LedProfile::Relay);
    svc.set_wanted_state(WantedState::Blink);

    svc.on_loop(f64::NAN);
    assert_eq!(svc.system_state(), SystemState::Blinking);
    svc.on_loop(f64::NAN);
    assert_eq!(svc.system_state(), SystemState::Blinking);

    svc.on_loop(ts(17));
    assert_eq!(svc.system_state(), SystemState::Off);
    assert_eq!(svc.wanted_state(), WantedState::Off);
    assert!(!svc.is_driver_on());
}

#[test]
fn blinking_ignores_new_requests_until_timeout() {
    let mut svc = make(LedProfile::Relay);
    svc.set_wanted_state(WantedState::Blink);
    svc.on_loop(0.0);
    svc.set_wanted_state(WantedState::FixedOn);
    for i in 1..=16 {
        svc.on_loop(ts(i));
        assert_eq!(svc.system_state(), SystemState::Blinking);
    }
    svc.on_loop(ts(17));
    assert_eq!(svc.system_state(), SystemState::Off);
    // Completion clears whatever was requested meanwhile.
    assert_eq!(svc.wanted_state(), WantedState::Off);
}

#[test]
fn new_request_keeps_running_cadence() {
    let mut svc = make(LedProfile::Relay);
    svc.set_wanted_state(WantedState::Blink);
    svc.on_loop(0.0);
    svc.set_wanted_state(WantedState::Warn);
    assert_eq!(svc.active_cadence(), BlinkConfig::default());
    assert_eq!(svc.selected_cadence(), BlinkConfig::default().hurried());
}

#[test]
fn configure_blink_extends_run_in_progress() {
    let mut svc = make(LedProfile::Relay);
    svc.set_wanted_state(WantedState::Blink);
    svc.on_loop(0.0);
    svc.configure_blink(10, 0.2);
    svc.on_loop(1.5);
    assert_eq!(svc.system_state(), SystemState::Blinking);
    svc.on_loop(2.01);
    assert_eq!(svc.system_state(), SystemState::Off);
}

// ── Fixed on / off ────────────────────────────────────────────

#[test]
fn held_off_never_writes() {
    let mut svc = make(LedProfile::Relay);
    let before = hw(&svc).calls.len();
    for i in 0..200u32 {
        svc.on_loop(f64::from(i) * 0.37);
        assert_eq!(svc.system_state(), SystemState::Off);
        assert!(!svc.is_driver_on());
    }
    assert_eq!(hw(&svc).calls.len(), before);
}

#[test]
fn fixed_on_then_off() {
    let mut svc = make(LedProfile::Digital);
    svc.set_wanted_state(WantedState::FixedOn);
    svc.on_loop(0.0);
    svc.on_loop(0.01);
    assert!(svc.is_driver_on());
    assert!(!svc.is_strip_on());

    svc.set_wanted_state(WantedState::Off);
    svc.on_loop(0.02);
    assert_eq!(svc.system_state(), SystemState::Off);
    svc.on_loop(0.03);
    assert!(!svc.is_driver_on());
    assert_eq!(svc.sink().state_changes(), 2);
}

// ── Range finding ─────────────────────────────────────────────

#[test]
fn relay_ranging_blinks_driver_until_cancelled() {
    let mut svc = make(LedProfile::Relay);
    svc.set_wanted_state(WantedState::FindRange);
    svc.on_loop(0.0);
    assert_eq!(svc.system_state(), SystemState::RangeFinding);

    // Hurried cadence: half period 0.05 s, so every tick flips the driver.
    for i in 1..100 {
        svc.on_loop(ts(i));
        assert_eq!(svc.system_state(), SystemState::RangeFinding);
        assert_eq!(svc.is_driver_on(), i % 2 == 0, "tick {i}");
    }

    svc.set_wanted_state(WantedState::FixedOn);
    svc.on_loop(ts(100));
    assert_eq!(svc.system_state(), SystemState::FixedOn);
}

#[test]
fn digital_ranging_blinks_strip_and_expires() {
    let mut svc = make(LedProfile::Digital);
    svc.set_wanted_state(WantedState::FindRange);
    svc.on_loop(0.0);

    for i in 1..=16 {
        svc.on_loop(ts(i));
        assert!(svc.is_driver_on());
        assert_eq!(svc.is_strip_on(), i % 2 == 0, "tick {i}");
    }
    svc.on_loop(ts(17));
    assert_eq!(svc.system_state(), SystemState::Off);
    assert_eq!(svc.wanted_state(), WantedState::Off);
    assert!(!svc.is_driver_on());
    assert!(!svc.is_strip_on());
}

#[test]
fn range_blinking_disabled_holds_indicator() {
    let mut svc = make(LedProfile::Digital);
    svc.handle_command(LedCommand::SetRangeBlinking(false));
    svc.set_wanted_state(WantedState::FindRange);
    svc.on_loop(0.0);
    for i in 1..10 {
        svc.on_loop(ts(i));
        assert!(svc.is_driver_on());
        assert!(!svc.is_strip_on());
    }
}

#[test]
fn warn_publishes_message_and_ranges() {
    let mut svc = make(LedProfile::Relay);
    svc.warn("Hatch panel not seated");
    svc.on_loop(0.0);
    assert_eq!(svc.system_state(), SystemState::RangeFinding);
    assert_eq!(svc.wanted_state(), WantedState::Warn);
    assert_eq!(svc.active_cadence().count(), 8);
    assert!(
        svc.sink()
            .events
            .contains(&LedEvent::Message("Hatch panel not seated".into()))
    );

    svc.set_wanted_state(WantedState::Off);
    assert_eq!(svc.message(), "");
    assert_eq!(svc.sink().events.last(), Some(&LedEvent::Message(String::new())));
}

// ── Lamp, status, lifecycle ───────────────────────────────────

#[test]
fn lamp_is_independent_of_fsm() {
    let mut svc = make(LedProfile::Relay);
    svc.set_lamp(true);
    svc.set_wanted_state(WantedState::Blink);
    for i in 0..=17 {
        svc.on_loop(ts(i));
        assert!(svc.lamp_on());
    }
    assert_eq!(hw(&svc).level_writes(Channel::Lamp), vec![false, true]);
}

#[test]
fn status_is_written_once_per_change() {
    let mut svc = make(LedProfile::Relay);
    svc.set_status(StatusCode::FlashingGreen);
    svc.set_status(StatusCode::FlashingGreen);
    svc.handle_command(LedCommand::SetStatus(StatusCode::YellowChasingBlue));
    assert_eq!(
        hw(&svc).status_frames(),
        vec![b"0".to_vec(), b"5".to_vec(), b"11".to_vec()]
    );
    assert_eq!(svc.status(), StatusCode::YellowChasingBlue);
}

#[test]
fn digital_board_ignores_status_and_lamp() {
    let mut svc = make(LedProfile::Digital);
    svc.set_status(StatusCode::Red);
    svc.set_lamp(true);
    assert!(hw(&svc).status_frames().is_empty());
    assert!(!svc.lamp_on());
    assert_eq!(svc.status(), StatusCode::Off);
}

#[test]
fn on_stop_forces_every_binary_output_off() {
    let mut svc = make(LedProfile::Relay);
    svc.set_lamp(true);
    svc.set_status(StatusCode::Blue);
    svc.set_wanted_state(WantedState::FixedOn);
    svc.on_loop(0.0);
    svc.on_loop(0.01);
    assert!(svc.is_driver_on());

    svc.on_stop(0.02);
    assert!(!svc.is_driver_on());
    assert!(!svc.lamp_on());
    assert_eq!(hw(&svc).last_level(Channel::Driver), Some(false));
    assert_eq!(svc.status(), StatusCode::Blue);
}

#[test]
fn on_start_resets_to_off() {
    let mut svc = make(LedProfile::Relay);
    svc.set_wanted_state(WantedState::FixedOn);
    svc.on_loop(0.0);
    svc.on_loop(0.01);
    svc.on_start(5.0);
    assert_eq!(svc.system_state(), SystemState::Off);
    assert_eq!(svc.wanted_state(), WantedState::Off);
    assert!(!svc.is_driver_on());
    let events = &svc.sink().events;
    assert_eq!(
        events[events.len() - 2..],
        [
            LedEvent::StateChanged {
                from: SystemState::FixedOn,
                to: SystemState::Off
            },
            LedEvent::WantedChanged(WantedState::Off),
        ]
    );
}

#[test]
fn on_start_clears_stale_warning() {
    let mut svc = make(LedProfile::Relay);
    svc.warn("Intake jammed");
    svc.on_loop(0.0);
    assert_eq!(svc.message(), "Intake jammed");

    svc.on_start(3.0);
    assert_eq!(svc.wanted_state(), WantedState::Off);
    assert_eq!(svc.message(), "");
    let events = &svc.sink().events;
    assert_eq!(
        events[events.len() - 3..],
        [
            LedEvent::StateChanged {
                from: SystemState::RangeFinding,
                to: SystemState::Off
            },
            LedEvent::WantedChanged(WantedState::Off),
            LedEvent::Message(String::new()),
        ]
    );

    let settled = svc.sink().events.len();
    svc.on_start(4.0);
    assert_eq!(svc.sink().events.len(), settled);
}

#[test]
fn dashboard_snapshot_reflects_outputs() {
    let mut svc = make(LedProfile::Relay);
    svc.set_lamp(true);
    svc.set_status(StatusCode::FadeBlue);
    svc.warn("Low battery");
    svc.on_loop(0.0);
    svc.publish_dashboard();

    let snap = svc.sink().last_snapshot().expect("snapshot").clone();
    assert!(snap.initialized);
    assert_eq!(snap.system, SystemState::RangeFinding);
    assert_eq!(snap.wanted, WantedState::Warn);
    assert!(snap.lamp_on);
    assert_eq!(snap.status, StatusCode::FadeBlue);
    assert_eq!(snap.message, "Low battery");
    assert_eq!(snap, svc.snapshot());
}

#[test]
fn invalid_config_is_clamped_not_fatal() {
    let mut config = LedConfig::default();
    config.blink_period_secs = -3.0;
    let mut svc = LedService::new(
        &config,
        Ok(MockLedPort::full()),
        RecordingSink::new(),
    );
    assert!(svc.is_initialized());
    svc.on_start(0.0);
    svc.set_wanted_state(WantedState::Blink);
    assert!(svc.selected_cadence().period_secs() > 0.0);
    svc.on_loop(0.0);
    svc.on_loop(1.0);
    assert_eq!(svc.system_state(), SystemState::Off);
}

#[test]
fn acquisition_error_is_reported_by_kind() {
    let err: Error = HwInitError::ChannelMissing("DriverLED").into();
    let svc: Svc = LedService::new(&LedConfig::default(), Err(err), RecordingSink::new());
    assert!(!svc.snapshot().initialized);
}
