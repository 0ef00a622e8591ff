//! LED subsystem configuration.
//!
//! Two hardware profiles share one controller.  Each profile comes with
//! its own defaults, and every behavioural difference between them is an
//! individual field so a board can mix and match.

use serde::{Deserialize, Serialize};

use crate::blink::{
    BlinkConfig, DEFAULT_BLINK_COUNT, DEFAULT_BLINK_PERIOD_SECS, MIN_BLINK_PERIOD_SECS,
};
use crate::error::{Error, Result};

/// Which set of physical channels the board carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedProfile {
    /// Driver LED and vision lamp on dual-direction relays, plus the
    /// serial status display.
    Relay,
    /// Driver LED and range strip on plain digital outputs.
    Digital,
}

/// Which output shows the range-finding blink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeIndicator {
    /// The driver LED itself blinks.
    Driver,
    /// The driver LED stays on and the range strip blinks.
    Strip,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedConfig {
    pub profile: LedProfile,

    // --- Default blink cadence ---
    /// On/off cycles in a default blink run.
    pub blink_count: u32,
    /// Seconds for one full on+off cycle.
    pub blink_period_secs: f64,

    // --- Range finding ---
    /// Whether range finding stops on its own after one cadence run.
    pub range_finding_is_finite: bool,
    pub range_indicator: RangeIndicator,
    /// When false the range indicator is held steady instead of blinking.
    pub range_blink_enabled: bool,

    // --- Timing ---
    /// Tick driver period (milliseconds).
    pub loop_interval_ms: u32,
}

impl LedConfig {
    pub fn for_profile(profile: LedProfile) -> Self {
        let (range_finding_is_finite, range_indicator) = match profile {
            LedProfile::Relay => (false, RangeIndicator::Driver),
            LedProfile::Digital => (true, RangeIndicator::Strip),
        };
        Self {
            profile,
            blink_count: DEFAULT_BLINK_COUNT,
            blink_period_secs: DEFAULT_BLINK_PERIOD_SECS,
            range_finding_is_finite,
            range_indicator,
            range_blink_enabled: true,
            loop_interval_ms: 10,
        }
    }

    /// Default cadence built from the configured count and period.
    pub fn blink(&self) -> BlinkConfig {
        BlinkConfig::new(self.blink_count, self.blink_period_secs)
    }

    /// Range-check every field.
    pub fn validate(&self) -> Result<()> {
        if !self.blink_period_secs.is_finite() || self.blink_period_secs < MIN_BLINK_PERIOD_SECS {
            return Err(Error::Config("blink_period_secs must be a positive number"));
        }
        if self.loop_interval_ms == 0 {
            return Err(Error::Config("loop_interval_ms must be non-zero"));
        }
        if self.profile == LedProfile::Relay && self.range_indicator == RangeIndicator::Strip {
            return Err(Error::Config("relay profile has no range strip"));
        }
        Ok(())
    }
}

impl Default for LedConfig {
    fn default() -> Self {
        Self::for_profile(LedProfile::Relay)
    }
}
