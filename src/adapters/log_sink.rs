//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing controller events to the logger
//! (UART / USB-CDC in production).  Dashboard snapshots are rendered as
//! one `key=value` line so they stay greppable.

use log::{debug, info};

use crate::app::events::LedEvent;
use crate::app::ports::{Channel, EventSink};

/// Adapter that logs every [`LedEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &LedEvent) {
        match event {
            LedEvent::Initialized(ok) => {
                info!("LED | initialized={}", ok);
            }
            LedEvent::StateChanged { from, to } => {
                info!("LED | state {} -> {}", from.name(), to.name());
            }
            LedEvent::WantedChanged(wanted) => {
                info!("LED | wanted={}", wanted.name());
            }
            LedEvent::LevelChanged { channel, on } => {
                debug!("LED | {}={}", channel.name(), on);
            }
            LedEvent::StatusChanged(code) => {
                info!("LED | status={} ({})", code, code.code());
            }
            LedEvent::Message(text) => {
                info!("LED | message=\"{}\"", text);
            }
            LedEvent::Snapshot(s) => {
                info!(
                    "DASH | initialized={} | state={} | wanted={} | {}={} {}={} {}={} | status={} | message=\"{}\"",
                    s.initialized,
                    s.system.name(),
                    s.wanted.name(),
                    Channel::Driver.name(),
                    s.driver_on,
                    Channel::Strip.name(),
                    s.strip_on,
                    Channel::Lamp.name(),
                    s.lamp_on,
                    s.status,
                    s.message,
                );
            }
        }
    }
}
