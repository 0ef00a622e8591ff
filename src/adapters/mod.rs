//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements | Connects to                         |
//! |------------|------------|-------------------------------------|
//! | `hardware` | LedPort    | Relays, GPIO outputs, status UART   |
//! | `log_sink` | EventSink  | Serial log output                   |
//! | `time`     | —          | ESP32 system timer (tick timestamps)|

pub mod hardware;
pub mod log_sink;
pub mod time;
