//! Inbound commands to the LED service.
//!
//! These represent requests from the outside world (vision pipeline,
//! dashboard, autonomous routines) that
//! [`LedService::handle_command`](super::service::LedService::handle_command)
//! dispatches onto the matching operation.

use serde::{Deserialize, Serialize};

use crate::fsm::WantedState;
use crate::status::StatusCode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LedCommand {
    /// Overwrite the wanted state.
    SetWanted(WantedState),

    /// Request a warning blink and show `message` to the drivers.
    Warn(String),

    /// Override the blink cadence immediately.
    ConfigureBlink { count: u32, period_secs: f64 },

    /// Show a pattern on the status display.
    SetStatus(StatusCode),

    /// Switch the vision lamp.
    SetLamp(bool),

    /// Enable or disable blinking of the range indicator.
    SetRangeBlinking(bool),
}
