//! Cooperative tick driver.
//!
//! The [`Looper`] owns no clock: the main task samples a timestamp and
//! hands it to [`Looper::tick`], which fans it out to every registered
//! [`Loop`].
//!
//! ```text
//!   main task ──ts──▶ Looper ──▶ slot 0: &dyn Loop (SharedLed)
//!                          ├──▶ slot 1: ...
//!                          └──▶ slot N (≤ LOOPER_CAPACITY)
//! ```
//!
//! Contract enforced here for every loop:
//! `on_start` once, then `on_loop` with non-decreasing timestamps, then
//! `on_stop` at most once.

use heapless::Vec;
use log::{info, warn};

/// Maximum number of loops one [`Looper`] can drive.
pub const LOOPER_CAPACITY: usize = 4;

/// A periodic task driven by the [`Looper`].
///
/// Methods take `&self`; implementors provide their own interior
/// mutability so the same object can also be reached from other tasks.
pub trait Loop {
    fn on_start(&self, timestamp: f64);
    fn on_loop(&self, timestamp: f64);
    fn on_stop(&self, timestamp: f64);

    /// Label used in log output.
    fn name(&self) -> &'static str {
        "loop"
    }
}

pub struct Looper<'a> {
    slots: Vec<&'a dyn Loop, LOOPER_CAPACITY>,
    started: bool,
    stopped: bool,
    last_timestamp: f64,
}

impl<'a> Looper<'a> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            started: false,
            stopped: false,
            last_timestamp: f64::NEG_INFINITY,
        }
    }

    /// Add a loop.  Returns its slot index, or `None` when full.
    pub fn register(&mut self, target: &'a dyn Loop) -> Option<usize> {
        if self.started {
            warn!("Looper: cannot register {} after start", target.name());
            return None;
        }
        match self.slots.push(target) {
            Ok(()) => {
                info!("Looper: registered {} in slot {}", target.name(), self.slots.len() - 1);
                Some(self.slots.len() - 1)
            }
            Err(_) => {
                warn!("Looper: no free slot for {}", target.name());
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_running(&self) -> bool {
        self.started && !self.stopped
    }

    /// Call `on_start` on every registered loop.  Later calls are ignored.
    pub fn start(&mut self, timestamp: f64) {
        if self.started {
            warn!("Looper: already started");
            return;
        }
        self.started = true;
        self.last_timestamp = timestamp;
        info!("Looper: starting {} loop(s)", self.slots.len());
        for target in &self.slots {
            target.on_start(timestamp);
        }
    }

    /// Call `on_loop` on every registered loop.  Ignored before
    /// [`start`](Self::start) and after [`stop`](Self::stop).
    pub fn tick(&mut self, timestamp: f64) {
        if !self.is_running() {
            return;
        }
        let timestamp = self.monotonic(timestamp);
        for target in &self.slots {
            target.on_loop(timestamp);
        }
    }

    /// Call `on_stop` on every registered loop.  Runs at most once.
    pub fn stop(&mut self, timestamp: f64) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        let timestamp = self.monotonic(timestamp);
        info!("Looper: stopping");
        for target in &self.slots {
            target.on_stop(timestamp);
        }
    }

    fn monotonic(&mut self, timestamp: f64) -> f64 {
        if timestamp < self.last_timestamp || timestamp.is_nan() {
            warn!(
                "Looper: timestamp {} went backwards, holding {}",
                timestamp, self.last_timestamp
            );
            return self.last_timestamp;
        }
        self.last_timestamp = timestamp;
        timestamp
    }
}

impl Default for Looper<'_> {
    fn default() -> Self {
        Self::new()
    }
}
