//! Port traits — the boundary between the controller and the outside world.
//!
//! ```text
//!   BinaryOutput ─┐
//!   BinaryOutput ─┼─▶ LedPort ──▶ LedService ──▶ EventSink
//! StatusTransport ┘
//! ```
//!
//! Drivers implement [`BinaryOutput`] and [`StatusTransport`]; the
//! hardware adapter bundles them behind [`LedPort`], which is all the
//! [`LedService`](super::service::LedService) ever sees.

use serde::{Deserialize, Serialize};

use super::events::LedEvent;

// ───────────────────────────────────────────────────────────────
// Channels
// ───────────────────────────────────────────────────────────────

/// A binary output line the controller can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// Primary indicator the drivers watch.
    Driver,
    /// Secondary range-finding strip.
    Strip,
    /// Illumination lamp for the vision camera.
    Lamp,
}

impl Channel {
    pub const COUNT: usize = 3;
    pub const ALL: [Channel; Self::COUNT] = [Self::Driver, Self::Strip, Self::Lamp];

    /// Dashboard key for this channel.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Driver => "DriverLED",
            Self::Strip => "RangeLED",
            Self::Lamp => "VisionLamp",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

// ───────────────────────────────────────────────────────────────
// Driver-level sinks
// ───────────────────────────────────────────────────────────────

/// Anything that can be switched on or off.  Fire-and-forget.
pub trait BinaryOutput {
    fn set(&mut self, on: bool);
}

/// Byte-oriented link to the status display.  No acknowledgment.
pub trait StatusTransport {
    fn write(&mut self, bytes: &[u8]);
}

// ───────────────────────────────────────────────────────────────
// LED port (driven adapter: controller → hardware)
// ───────────────────────────────────────────────────────────────

pub trait LedPort {
    /// Whether this board carries `channel`.
    fn has_channel(&self, channel: Channel) -> bool;

    /// Drive `channel` to `on`.  Ignored for absent channels.
    fn set_level(&mut self, channel: Channel, on: bool);

    /// Whether this board carries a status display link.
    fn has_status(&self) -> bool;

    /// Send an encoded status code.  Ignored when there is no link.
    fn write_status(&mut self, bytes: &[u8]);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: controller → logging / dashboard)
// ───────────────────────────────────────────────────────────────

/// The controller emits [`LedEvent`]s through this port.  Publishing is
/// best-effort: implementations swallow their own failures.
pub trait EventSink {
    fn emit(&mut self, event: &LedEvent);
}

/// Sink that drops everything.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &LedEvent) {}
}
