//! Concrete state handler functions and table builder.
//!
//! ```text
//!          ┌──────────[wanted]───────────┐
//!          ▼                             │
//!  OFF ◀──────▶ FIXED_ON ◀──────▶ RANGE_FINDING
//!   ▲  │                              │
//!   │  └──[Blink]──▶ BLINKING         │
//!   │                   │             │
//!   └────[expired]──────┴──[expired, finite only]
//! ```
//!
//! `Off`, `FixedOn` and `RangeFinding` follow the wanted state on every
//! tick.  `Blinking` only leaves through its own timeout.

use super::context::LedContext;
use super::{StateDescriptor, SystemState, WantedState};
use crate::config::RangeIndicator;
use log::info;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once per controller.
pub fn build_state_table() -> [StateDescriptor; SystemState::COUNT] {
    [
        // Index 0 — Off
        StateDescriptor {
            id: SystemState::Off,
            name: SystemState::Off.name(),
            on_enter: None,
            on_update: off_update,
        },
        // Index 1 — FixedOn
        StateDescriptor {
            id: SystemState::FixedOn,
            name: SystemState::FixedOn.name(),
            on_enter: None,
            on_update: fixed_on_update,
        },
        // Index 2 — Blinking
        StateDescriptor {
            id: SystemState::Blinking,
            name: SystemState::Blinking.name(),
            on_enter: Some(blink_enter),
            on_update: blinking_update,
        },
        // Index 3 — RangeFinding
        StateDescriptor {
            id: SystemState::RangeFinding,
            name: SystemState::RangeFinding.name(),
            on_enter: Some(blink_enter),
            on_update: ranging_update,
        },
    ]
}

/// State that directly serves `wanted`.
pub fn default_transfer(wanted: WantedState) -> SystemState {
    match wanted {
        WantedState::Off => SystemState::Off,
        WantedState::FixedOn => SystemState::FixedOn,
        WantedState::Blink => SystemState::Blinking,
        WantedState::FindRange | WantedState::Warn => SystemState::RangeFinding,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  OFF / FIXED_ON
// ═══════════════════════════════════════════════════════════════════════════

fn off_update(ctx: &mut LedContext) -> SystemState {
    ctx.commands.set_both(false);
    default_transfer(ctx.wanted)
}

fn fixed_on_update(ctx: &mut LedContext) -> SystemState {
    ctx.commands.driver = Some(true);
    default_transfer(ctx.wanted)
}

// ═══════════════════════════════════════════════════════════════════════════
//  BLINKING / RANGE_FINDING
// ═══════════════════════════════════════════════════════════════════════════

fn blink_enter(ctx: &mut LedContext) {
    ctx.latch_cadence();
}

fn blinking_update(ctx: &mut LedContext) -> SystemState {
    if ctx.active.is_expired(ctx.time_in_state) {
        return expire(ctx);
    }
    let on = ctx.active.is_on(ctx.time_in_state);
    ctx.commands.set_both(on);
    SystemState::Blinking
}

fn ranging_update(ctx: &mut LedContext) -> SystemState {
    if ctx.range_finding_is_finite && ctx.active.is_expired(ctx.time_in_state) {
        return expire(ctx);
    }

    let phase = ctx.active.is_on(ctx.time_in_state);
    match (ctx.range_indicator, ctx.range_blink_enabled) {
        (RangeIndicator::Driver, true) => ctx.commands.driver = Some(phase),
        (RangeIndicator::Driver, false) => ctx.commands.driver = Some(true),
        (RangeIndicator::Strip, true) => {
            ctx.commands.driver = Some(true);
            ctx.commands.strip = Some(phase);
        }
        (RangeIndicator::Strip, false) => ctx.commands.driver = Some(true),
    }
    default_transfer(ctx.wanted)
}

/// End of a finite run: outputs off and the request cleared.
fn expire(ctx: &mut LedContext) -> SystemState {
    info!("Blink run finished after {:.3}s", ctx.time_in_state);
    ctx.commands.set_both(false);
    ctx.wanted = WantedState::Off;
    SystemState::Off
}
