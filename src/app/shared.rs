//! Thread-safe handle to the [`LedService`].
//!
//! The tick driver and any number of request producers (vision task,
//! dashboard handler) share one service.  Every call takes a single
//! critical-section lock for its whole duration, so a setter is fully
//! visible to the next tick and ticks never interleave.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use crate::blink::BlinkConfig;
use crate::fsm::{SystemState, WantedState};
use crate::looper::{Loop, Looper};
use crate::status::StatusCode;

use super::commands::LedCommand;
use super::events::LedSnapshot;
use super::ports::{EventSink, LedPort};
use super::service::LedService;

pub struct SharedLed<H, E> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<LedService<H, E>>>,
}

impl<H: LedPort, E: EventSink> SharedLed<H, E> {
    pub fn new(service: LedService<H, E>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(service)),
        }
    }

    /// Run `f` with exclusive access to the service.
    pub fn with<R>(&self, f: impl FnOnce(&mut LedService<H, E>) -> R) -> R {
        self.inner.lock(|cell| f(&mut *cell.borrow_mut()))
    }

    /// Register with `looper` if the controller is usable.
    pub fn register_enabled_loops<'a>(&'a self, looper: &mut Looper<'a>) -> Option<usize> {
        if !self.is_initialized() {
            log::warn!("LED subsystem not initialized, not registering its loop");
            return None;
        }
        looper.register(self)
    }

    // ── Requests ──────────────────────────────────────────────

    pub fn set_wanted_state(&self, wanted: WantedState) {
        self.with(|s| s.set_wanted_state(wanted));
    }

    pub fn warn(&self, message: &str) {
        self.with(|s| s.warn(message));
    }

    pub fn configure_blink(&self, count: u32, period_secs: f64) {
        self.with(|s| s.configure_blink(count, period_secs));
    }

    pub fn set_status(&self, code: StatusCode) {
        self.with(|s| s.set_status(code));
    }

    pub fn set_lamp(&self, on: bool) {
        self.with(|s| s.set_lamp(on));
    }

    pub fn set_range_blinking(&self, enabled: bool) {
        self.with(|s| s.set_range_blinking(enabled));
    }

    pub fn handle_command(&self, cmd: LedCommand) {
        self.with(|s| s.handle_command(cmd));
    }

    pub fn publish_dashboard(&self) {
        self.with(|s| s.publish_dashboard());
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn system_state(&self) -> SystemState {
        self.with(|s| s.system_state())
    }

    pub fn wanted_state(&self) -> WantedState {
        self.with(|s| s.wanted_state())
    }

    pub fn is_driver_on(&self) -> bool {
        self.with(|s| s.is_driver_on())
    }

    pub fn is_strip_on(&self) -> bool {
        self.with(|s| s.is_strip_on())
    }

    pub fn lamp_on(&self) -> bool {
        self.with(|s| s.lamp_on())
    }

    pub fn status(&self) -> StatusCode {
        self.with(|s| s.status())
    }

    pub fn selected_cadence(&self) -> BlinkConfig {
        self.with(|s| s.selected_cadence())
    }

    pub fn active_cadence(&self) -> BlinkConfig {
        self.with(|s| s.active_cadence())
    }

    pub fn is_initialized(&self) -> bool {
        self.with(|s| s.is_initialized())
    }

    pub fn snapshot(&self) -> LedSnapshot {
        self.with(|s| s.snapshot())
    }
}

impl<H: LedPort, E: EventSink> Loop for SharedLed<H, E> {
    fn on_start(&self, timestamp: f64) {
        self.with(|s| s.on_start(timestamp));
    }

    fn on_loop(&self, timestamp: f64) {
        self.with(|s| s.on_loop(timestamp));
    }

    fn on_stop(&self, timestamp: f64) {
        self.with(|s| s.on_stop(timestamp));
    }

    fn name(&self) -> &'static str {
        "LED"
    }
}
