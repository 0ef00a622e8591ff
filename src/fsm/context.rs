//! Shared mutable context threaded through every FSM handler.
//!
//! `LedContext` holds the wanted state, the blink cadences, the timing of
//! the current tick, and the channel commands the handlers produce.  The
//! service applies those commands to hardware after each tick.

use crate::blink::BlinkConfig;
use crate::config::{LedConfig, RangeIndicator};

use super::WantedState;

// ---------------------------------------------------------------------------
// Channel commands (written by state handlers; consumed by the service)
// ---------------------------------------------------------------------------

/// Desired levels for the FSM-driven channels.  `None` leaves the
/// channel as it is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelCommands {
    pub driver: Option<bool>,
    pub strip: Option<bool>,
}

impl ChannelCommands {
    /// Driver and strip both off.
    pub fn all_off() -> Self {
        Self {
            driver: Some(false),
            strip: Some(false),
        }
    }

    pub fn set_both(&mut self, on: bool) {
        self.driver = Some(on);
        self.strip = Some(on);
    }
}

// ---------------------------------------------------------------------------
// LedContext
// ---------------------------------------------------------------------------

pub struct LedContext {
    // -- Request --
    /// Externally requested mode.  Cleared back to `Off` when a finite
    /// blink run completes.
    pub wanted: WantedState,

    // -- Cadence --
    /// Cadence used for `Blink` requests.
    pub base: BlinkConfig,
    /// Cadence chosen by the latest request.
    pub selected: BlinkConfig,
    /// Cadence of the run in progress; latched on entry to a blinking state.
    pub active: BlinkConfig,

    // -- Timing --
    /// Seconds since the current system state was entered.
    pub time_in_state: f64,

    // -- Range finding --
    pub range_finding_is_finite: bool,
    pub range_indicator: RangeIndicator,
    pub range_blink_enabled: bool,

    // -- Outputs --
    /// Commands for this tick.  Reset before every handler call.
    pub commands: ChannelCommands,
}

impl LedContext {
    pub fn new(config: &LedConfig) -> Self {
        let base = config.blink();
        Self {
            wanted: WantedState::Off,
            base,
            selected: base,
            active: base,
            time_in_state: 0.0,
            range_finding_is_finite: config.range_finding_is_finite,
            range_indicator: config.range_indicator,
            range_blink_enabled: config.range_blink_enabled,
            commands: ChannelCommands::default(),
        }
    }

    /// Record a new request and pick the cadence that goes with it.
    pub fn request(&mut self, wanted: WantedState) {
        self.wanted = wanted;
        match wanted {
            WantedState::Blink => self.selected = self.base,
            WantedState::FindRange | WantedState::Warn => self.selected = self.base.hurried(),
            WantedState::Off | WantedState::FixedOn => {}
        }
    }

    /// Override the cadence immediately, including a run in progress.
    pub fn override_cadence(&mut self, cadence: BlinkConfig) {
        self.selected = cadence;
        self.active = cadence;
    }

    /// Start using the selected cadence for a new run.
    pub fn latch_cadence(&mut self) {
        self.active = self.selected;
    }
}
