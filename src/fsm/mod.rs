//! Function-pointer finite state machine engine.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  StateTable                                          │
//! │  ┌──────────────┬───────────┬───────────────────────┐ │
//! │  │ SystemState  │ on_enter  │ on_update             │ │
//! │  ├──────────────┼───────────┼───────────────────────┤ │
//! │  │ Off          │ —         │ fn(ctx) -> next       │ │
//! │  │ FixedOn      │ —         │ fn(ctx) -> next       │ │
//! │  │ Blinking     │ fn(ctx)   │ fn(ctx) -> next       │ │
//! │  │ RangeFinding │ fn(ctx)   │ fn(ctx) -> next       │ │
//! │  └──────────────┴───────────┴───────────────────────┘ │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine measures time-in-state from the supplied
//! timestamp and calls `on_update` for the **current** state.  When the
//! returned state differs, the engine logs the transition, restarts the
//! state clock and runs `on_enter` for the new state.  The engine never
//! reads a clock of its own.

pub mod context;
pub mod states;

use context::{ChannelCommands, LedContext};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Confirmed, currently executing mode.
/// Must stay in sync with the state table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SystemState {
    Off = 0,
    FixedOn = 1,
    Blinking = 2,
    RangeFinding = 3,
}

impl SystemState {
    /// Total number of states; sizes the table array.
    pub const COUNT: usize = 4;

    pub fn from_index(idx: usize) -> Option<Self> {
        match idx {
            0 => Some(Self::Off),
            1 => Some(Self::FixedOn),
            2 => Some(Self::Blinking),
            3 => Some(Self::RangeFinding),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::FixedOn => "FIXED_ON",
            Self::Blinking => "BLINKING",
            Self::RangeFinding => "RANGE_FINDING",
        }
    }
}

/// Externally requested mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WantedState {
    #[default]
    Off,
    FixedOn,
    Blink,
    FindRange,
    Warn,
}

impl WantedState {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::FixedOn => "FIXED_ON",
            Self::Blink => "BLINK",
            Self::FindRange => "FIND_RANGE",
            Self::Warn => "WARN",
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter`.  Runs exactly once per transition into a state.
pub type StateActionFn = fn(&mut LedContext);

/// Signature for the per-tick update handler.  Returns the next state,
/// which may be the current one.
pub type StateUpdateFn = fn(&mut LedContext) -> SystemState;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

pub struct StateDescriptor {
    pub id: SystemState,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

/// A state change performed by [`Fsm::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: SystemState,
    pub to: SystemState,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

pub struct Fsm {
    /// Fixed-size table indexed by `SystemState as usize`.
    table: [StateDescriptor; SystemState::COUNT],
    /// Index of the currently active state.
    current: usize,
    /// Timestamp (seconds) at which the current state was entered.
    state_start_secs: f64,
}

impl Fsm {
    pub fn new(table: [StateDescriptor; SystemState::COUNT]) -> Self {
        Self {
            table,
            current: SystemState::Off as usize,
            state_start_secs: 0.0,
        }
    }

    /// Force `Off` and restart the state clock at `now`.
    pub fn reset(&mut self, now: f64) {
        self.current = SystemState::Off as usize;
        self.state_start_secs = self.finite_or_start(now);
    }

    /// `now` if finite, else the current state start (zero elapsed).
    fn finite_or_start(&self, now: f64) -> f64 {
        if now.is_finite() {
            now
        } else {
            warn!("Non-finite LED timestamp {}, treating as no elapsed time", now);
            self.state_start_secs
        }
    }

    /// Advance the FSM by one tick at timestamp `now`.
    ///
    /// 1. Clear the channel commands and compute time-in-state.  A
    ///    non-finite `now` counts as no time elapsed.
    /// 2. Call `on_update` for the current state.
    /// 3. On a change of state: log, restart the clock, run `on_enter`.
    pub fn tick(&mut self, now: f64, ctx: &mut LedContext) -> Option<Transition> {
        let now = self.finite_or_start(now);
        ctx.commands = ChannelCommands::default();
        ctx.time_in_state = now - self.state_start_secs;

        let Some(descriptor) = self.table.get(self.current) else {
            error!("Fell through on LED states (index {}), forcing OFF", self.current);
            ctx.commands = ChannelCommands::all_off();
            self.reset(now);
            return None;
        };
        let from = descriptor.id;
        let from_name = descriptor.name;
        let next = (descriptor.on_update)(ctx);

        if next == from {
            return None;
        }

        self.current = next as usize;
        let entered = &self.table[self.current];
        info!("LED state {} to {}", from_name, entered.name);
        self.state_start_secs = now;
        if let Some(enter) = entered.on_enter {
            enter(ctx);
        }
        Some(Transition { from, to: next })
    }

    pub fn current_state(&self) -> SystemState {
        SystemState::from_index(self.current).unwrap_or(SystemState::Off)
    }

    /// Timestamp at which the current state was entered.
    pub fn state_start_secs(&self) -> f64 {
        self.state_start_secs
    }
}
