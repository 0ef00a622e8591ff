//! Output reconciler — writes a channel only when its level changes.
//!
//! Every physical channel has a latch holding the last value written
//! (`None` until the first write).  A request matching the latch is a
//! no-op, so the controller can recompute its outputs every tick without
//! hammering relays or the serial link.

use log::debug;

use crate::status::StatusCode;

use super::events::LedEvent;
use super::ports::{Channel, EventSink, LedPort};

#[derive(Debug, Default)]
pub struct OutputReconciler {
    levels: [Option<bool>; Channel::COUNT],
    status: Option<StatusCode>,
}

impl OutputReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drive `channel` to `on` if it differs from the latch.
    ///
    /// Returns `true` when a physical write was issued.
    pub fn apply_level(
        &mut self,
        port: &mut impl LedPort,
        channel: Channel,
        on: bool,
        sink: &mut impl EventSink,
    ) -> bool {
        if !port.has_channel(channel) {
            return false;
        }
        let latch = &mut self.levels[channel.index()];
        if *latch == Some(on) {
            return false;
        }
        port.set_level(channel, on);
        *latch = Some(on);
        debug!("{} -> {}", channel.name(), if on { "on" } else { "off" });
        sink.emit(&LedEvent::LevelChanged { channel, on });
        true
    }

    /// Send `code` to the status display if it differs from the latch.
    ///
    /// Returns `true` when a physical write was issued.
    pub fn apply_code(
        &mut self,
        port: &mut impl LedPort,
        code: StatusCode,
        sink: &mut impl EventSink,
    ) -> bool {
        if !port.has_status() || self.status == Some(code) {
            return false;
        }
        port.write_status(code.encode().as_bytes());
        self.status = Some(code);
        debug!("Status -> {}", code);
        sink.emit(&LedEvent::StatusChanged(code));
        true
    }

    /// Last level written to `channel`, if any.
    pub fn level(&self, channel: Channel) -> Option<bool> {
        self.levels[channel.index()]
    }

    /// Last status code written, if any.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }
}
