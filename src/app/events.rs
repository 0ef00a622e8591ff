//! Outbound controller events.
//!
//! The [`LedService`](super::service::LedService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  What happens to them
//! is up to the adapter on the other side.

use crate::fsm::{SystemState, WantedState};
use crate::status::StatusCode;

use super::ports::Channel;

#[derive(Debug, Clone, PartialEq)]
pub enum LedEvent {
    /// Construction finished; `false` means the controller is inert.
    Initialized(bool),

    /// The system state changed.  Emitted once per actual change.
    StateChanged { from: SystemState, to: SystemState },

    /// A caller requested a new wanted state.
    WantedChanged(WantedState),

    /// A binary channel was physically switched.
    LevelChanged { channel: Channel, on: bool },

    /// A new code was written to the status display.
    StatusChanged(StatusCode),

    /// Free-text annotation for the drivers.  Empty clears it.
    Message(String),

    /// Periodic dashboard snapshot.
    Snapshot(LedSnapshot),
}

/// Point-in-time view of the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct LedSnapshot {
    pub initialized: bool,
    pub system: SystemState,
    pub wanted: WantedState,
    pub driver_on: bool,
    pub strip_on: bool,
    pub lamp_on: bool,
    pub status: StatusCode,
    pub message: String,
}
