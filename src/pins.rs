//! GPIO / peripheral pin assignments for the LED subsystem.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Driver LED
// ---------------------------------------------------------------------------

/// Relay forward coil for the driver LED (relay profile).
pub const DRIVER_LED_FWD_GPIO: i32 = 1;
/// Relay reverse coil for the driver LED (relay profile).
pub const DRIVER_LED_REV_GPIO: i32 = 2;
/// Plain digital output for the driver LED (digital profile). Active HIGH.
pub const DRIVER_LED_GPIO: i32 = 3;

// ---------------------------------------------------------------------------
// Vision lamp (relay profile)
// ---------------------------------------------------------------------------

pub const VISION_LAMP_FWD_GPIO: i32 = 4;
pub const VISION_LAMP_REV_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Range strip (digital profile)
// ---------------------------------------------------------------------------

/// Digital output for the range-finding LED strip. Active HIGH.
pub const RANGE_LED_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Status display UART (relay profile)
// ---------------------------------------------------------------------------

pub const STATUS_UART_PORT: i32 = 1;
pub const STATUS_UART_TX_GPIO: i32 = 17;
pub const STATUS_UART_RX_GPIO: i32 = 18;
/// Baud rate the status display firmware expects.
pub const STATUS_UART_BAUD: u32 = 9600;
