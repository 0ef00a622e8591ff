//! UART link to the status display.
//!
//! Frames are the ASCII code bytes with no terminator.  Writes are
//! fire-and-forget; a short write is logged and otherwise ignored.

use log::warn;

use crate::app::ports::StatusTransport;
use crate::drivers::hw_init;

pub struct SerialPort {
    port: i32,
    bytes_sent: usize,
}

impl SerialPort {
    pub fn new(port: i32) -> Self {
        Self {
            port,
            bytes_sent: 0,
        }
    }

    /// Total bytes accepted by the UART since construction.
    pub fn bytes_sent(&self) -> usize {
        self.bytes_sent
    }
}

impl StatusTransport for SerialPort {
    fn write(&mut self, bytes: &[u8]) {
        let written = hw_init::uart_write(self.port, bytes);
        if written < bytes.len() {
            warn!(
                "Status UART{}: short write ({} of {} bytes)",
                self.port,
                written,
                bytes.len()
            );
        }
        self.bytes_sent += written;
    }
}
