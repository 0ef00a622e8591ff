//! LED service — the hexagonal core.
//!
//! [`LedService`] owns the FSM, its context, the output latches, the
//! hardware port and the event sink.  Callers feed it timestamps and
//! requests; it never reads a clock and never blocks.
//!
//! ```text
//!  requests ──▶ ┌────────────────────────────┐ ──▶ EventSink
//!               │         LedService          │
//!  timestamps ─▶│  FSM · BlinkTimer · Latches │ ──▶ LedPort
//!               └────────────────────────────┘
//! ```
//!
//! If the hardware could not be acquired the service is *inert*: every
//! operation returns immediately and nothing is written.

use log::{error, info, warn};

use crate::blink::BlinkConfig;
use crate::config::LedConfig;
use crate::error::Error;
use crate::fsm::context::LedContext;
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, SystemState, WantedState};
use crate::status::StatusCode;

use super::commands::LedCommand;
use super::events::{LedEvent, LedSnapshot};
use super::ports::{Channel, EventSink, LedPort};
use super::reconciler::OutputReconciler;

// ───────────────────────────────────────────────────────────────
// LedService
// ───────────────────────────────────────────────────────────────

pub struct LedService<H, E> {
    /// `None` when acquisition failed.
    hw: Option<H>,
    sink: E,
    fsm: Fsm,
    ctx: LedContext,
    outputs: OutputReconciler,
    /// Free-text annotation shown next to the indicator.
    message: String,
}

impl<H: LedPort, E: EventSink> LedService<H, E> {
    /// Build the controller around already-acquired hardware.
    ///
    /// On success every primary output is forced off and the status
    /// display cleared, so the latches start from a known state.
    pub fn new(config: &LedConfig, hardware: Result<H, Error>, sink: E) -> Self {
        if let Err(e) = config.validate() {
            warn!("LED config rejected ({}), continuing with clamped values", e);
        }

        let hw = match hardware {
            Ok(hw) => Some(hw),
            Err(e) => {
                error!("LED hardware unavailable: {}", e);
                None
            }
        };

        let mut service = Self {
            hw,
            sink,
            fsm: Fsm::new(build_state_table()),
            ctx: LedContext::new(config),
            outputs: OutputReconciler::new(),
            message: String::new(),
        };

        let initialized = service.is_initialized();
        if initialized {
            for channel in Channel::ALL {
                service.drive(channel, false);
            }
            service.set_status(StatusCode::Off);
            info!("LED subsystem ready ({:?} profile)", config.profile);
        }
        service.sink.emit(&LedEvent::Initialized(initialized));
        service
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Reset system and wanted state to `Off`, clear the annotation and
    /// restart the state clock at `now`.
    pub fn on_start(&mut self, now: f64) {
        if !self.is_initialized() {
            return;
        }
        info!("LED subsystem starting at {:.3}s", now);
        let prev = self.fsm.current_state();
        let prev_wanted = self.ctx.wanted;
        self.fsm.reset(now);
        self.ctx.wanted = WantedState::Off;
        self.drive(Channel::Driver, false);
        self.drive(Channel::Strip, false);
        if prev != SystemState::Off {
            self.sink.emit(&LedEvent::StateChanged {
                from: prev,
                to: SystemState::Off,
            });
        }
        if prev_wanted != WantedState::Off {
            self.sink.emit(&LedEvent::WantedChanged(WantedState::Off));
        }
        self.set_message("");
    }

    /// Run one control tick at `now`: FSM → channel commands → hardware.
    pub fn on_loop(&mut self, now: f64) {
        if !self.is_initialized() {
            return;
        }
        let wanted_before = self.ctx.wanted;
        let transition = self.fsm.tick(now, &mut self.ctx);

        let commands = self.ctx.commands;
        if let Some(on) = commands.driver {
            self.drive(Channel::Driver, on);
        }
        if let Some(on) = commands.strip {
            self.drive(Channel::Strip, on);
        }

        if let Some(t) = transition {
            self.sink.emit(&LedEvent::StateChanged {
                from: t.from,
                to: t.to,
            });
        }
        if self.ctx.wanted != wanted_before {
            self.sink.emit(&LedEvent::WantedChanged(self.ctx.wanted));
        }
    }

    /// Force every binary output off.  The status display keeps its code.
    pub fn on_stop(&mut self, now: f64) {
        if !self.is_initialized() {
            return;
        }
        info!("LED subsystem stopping at {:.3}s", now);
        for channel in Channel::ALL {
            self.drive(channel, false);
        }
    }

    // ── Requests ──────────────────────────────────────────────

    /// Overwrite the wanted state.  Clears any warning annotation.
    pub fn set_wanted_state(&mut self, wanted: WantedState) {
        if !self.is_initialized() {
            return;
        }
        self.ctx.request(wanted);
        info!("LED wanted state {}", wanted.name());
        self.sink.emit(&LedEvent::WantedChanged(wanted));
        self.set_message("");
    }

    /// Request the warning pattern and show `message` alongside it.
    pub fn warn(&mut self, message: &str) {
        if !self.is_initialized() {
            return;
        }
        self.set_wanted_state(WantedState::Warn);
        warn!("LED warning: {}", message);
        self.set_message(message);
    }

    /// Replace the cadence now, including for a run already in progress.
    pub fn configure_blink(&mut self, count: u32, period_secs: f64) {
        if !self.is_initialized() {
            return;
        }
        let cadence = BlinkConfig::new(count, period_secs);
        info!(
            "LED blink cadence {} x {:.3}s",
            cadence.count(),
            cadence.period_secs()
        );
        self.ctx.override_cadence(cadence);
    }

    pub fn set_status(&mut self, code: StatusCode) {
        if let Some(hw) = self.hw.as_mut() {
            self.outputs.apply_code(hw, code, &mut self.sink);
        }
    }

    /// Switch the vision lamp.  The FSM never drives it.
    pub fn set_lamp(&mut self, on: bool) {
        self.drive(Channel::Lamp, on);
    }

    pub fn set_range_blinking(&mut self, enabled: bool) {
        if !self.is_initialized() {
            return;
        }
        info!("Range indicator blinking {}", if enabled { "enabled" } else { "disabled" });
        self.ctx.range_blink_enabled = enabled;
    }

    // ── Command handling ──────────────────────────────────────

    /// Dispatch a request delivered as a message.
    pub fn handle_command(&mut self, cmd: LedCommand) {
        match cmd {
            LedCommand::SetWanted(wanted) => self.set_wanted_state(wanted),
            LedCommand::Warn(message) => self.warn(&message),
            LedCommand::ConfigureBlink { count, period_secs } => {
                self.configure_blink(count, period_secs)
            }
            LedCommand::SetStatus(code) => self.set_status(code),
            LedCommand::SetLamp(on) => self.set_lamp(on),
            LedCommand::SetRangeBlinking(enabled) => self.set_range_blinking(enabled),
        }
    }

    /// Emit a [`LedEvent::Snapshot`] of the current outputs and states.
    pub fn publish_dashboard(&mut self) {
        if !self.is_initialized() {
            return;
        }
        let snapshot = self.snapshot();
        self.sink.emit(&LedEvent::Snapshot(snapshot));
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn system_state(&self) -> SystemState {
        self.fsm.current_state()
    }

    pub fn wanted_state(&self) -> WantedState {
        self.ctx.wanted
    }

    pub fn is_driver_on(&self) -> bool {
        self.outputs.level(Channel::Driver).unwrap_or(false)
    }

    pub fn is_strip_on(&self) -> bool {
        self.outputs.level(Channel::Strip).unwrap_or(false)
    }

    pub fn lamp_on(&self) -> bool {
        self.outputs.level(Channel::Lamp).unwrap_or(false)
    }

    /// Last code written to the status display (`Off` before any write).
    pub fn status(&self) -> StatusCode {
        self.outputs.status().unwrap_or_default()
    }

    /// Cadence the next blink run will use.
    pub fn selected_cadence(&self) -> BlinkConfig {
        self.ctx.selected
    }

    /// Cadence of the run in progress.
    pub fn active_cadence(&self) -> BlinkConfig {
        self.ctx.active
    }

    pub fn is_initialized(&self) -> bool {
        self.hw.is_some()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn snapshot(&self) -> LedSnapshot {
        LedSnapshot {
            initialized: self.is_initialized(),
            system: self.system_state(),
            wanted: self.wanted_state(),
            driver_on: self.is_driver_on(),
            strip_on: self.is_strip_on(),
            lamp_on: self.lamp_on(),
            status: self.status(),
            message: self.message.clone(),
        }
    }

    pub fn hardware(&self) -> Option<&H> {
        self.hw.as_ref()
    }

    pub fn sink(&self) -> &E {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut E {
        &mut self.sink
    }

    // ── Internal ──────────────────────────────────────────────

    fn drive(&mut self, channel: Channel, on: bool) {
        if let Some(hw) = self.hw.as_mut() {
            self.outputs.apply_level(hw, channel, on, &mut self.sink);
        }
    }

    fn set_message(&mut self, message: &str) {
        if self.message == message {
            return;
        }
        self.message.clear();
        self.message.push_str(message);
        self.sink.emit(&LedEvent::Message(self.message.clone()));
    }
}
