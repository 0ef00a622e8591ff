//! Blink timer and cadence configuration.
//!
//! Maps time-in-state onto a 50 % duty square wave that always starts
//! "on" at state entry:
//!
//! ```text
//!  elapsed ─▶ ┌──────┐      ┌──────┐      ┌──────┐
//!             │  on  │ off  │  on  │ off  │  on  │ ...
//!             └──────┴──────┴──────┴──────┴──────┘
//!             0    P/2     P    3P/2    2P
//! ```
//!
//! A cadence is a `(count, period)` pair; a finite run has expired once
//! `elapsed > count × period`.

use log::warn;

/// Number of on/off cycles in the default cadence.
pub const DEFAULT_BLINK_COUNT: u32 = 4;
/// Seconds for one full on+off cycle in the default cadence.
pub const DEFAULT_BLINK_PERIOD_SECS: f64 = 0.2;
/// Shortest accepted period.  Anything below is clamped up to this.
pub const MIN_BLINK_PERIOD_SECS: f64 = 0.001;

/// Tolerance applied to phase and expiry comparisons so that timestamps
/// landing exactly on a half-period boundary classify by their decimal
/// value rather than their binary rounding.
const PHASE_EPSILON: f64 = 1e-9;

/// Number of half-periods fully elapsed.  Negative or NaN elapsed times
/// count as zero.
pub fn cycle_index(elapsed_secs: f64, period_secs: f64) -> u64 {
    if elapsed_secs.is_nan() || elapsed_secs <= 0.0 {
        return 0;
    }
    let half = period_secs / 2.0;
    (elapsed_secs / half + PHASE_EPSILON).floor() as u64
}

/// `true` during the first half of every period.
pub fn phase_on(elapsed_secs: f64, period_secs: f64) -> bool {
    cycle_index(elapsed_secs, period_secs) % 2 == 0
}

/// A blink cadence: how many cycles and how long each lasts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlinkConfig {
    count: u32,
    period_secs: f64,
}

impl BlinkConfig {
    /// Build a cadence.  Non-finite or too-short periods are clamped to
    /// [`MIN_BLINK_PERIOD_SECS`].
    pub fn new(count: u32, period_secs: f64) -> Self {
        let period_secs = if period_secs.is_finite() && period_secs >= MIN_BLINK_PERIOD_SECS {
            period_secs
        } else {
            warn!(
                "Blink period {}s rejected, clamping to {}s",
                period_secs, MIN_BLINK_PERIOD_SECS
            );
            MIN_BLINK_PERIOD_SECS
        };
        Self { count, period_secs }
    }

    pub const fn count(&self) -> u32 {
        self.count
    }

    pub const fn period_secs(&self) -> f64 {
        self.period_secs
    }

    pub fn half_period_secs(&self) -> f64 {
        self.period_secs / 2.0
    }

    /// Length of a finite run: `count × period`.
    pub fn total_duration_secs(&self) -> f64 {
        self.count as f64 * self.period_secs
    }

    /// Twice as many cycles at half the period.  Same total duration,
    /// visibly faster.  Used for range-finding and warnings.
    pub fn hurried(&self) -> Self {
        Self::new(self.count.saturating_mul(2), self.period_secs * 0.5)
    }

    /// Phase of the square wave `elapsed_secs` after entering the state.
    pub fn is_on(&self, elapsed_secs: f64) -> bool {
        phase_on(elapsed_secs, self.period_secs)
    }

    /// Whether a finite run has completed all its cycles.
    pub fn is_expired(&self, elapsed_secs: f64) -> bool {
        elapsed_secs > self.total_duration_secs() + PHASE_EPSILON
    }
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BLINK_COUNT, DEFAULT_BLINK_PERIOD_SECS)
    }
}
