//! Single-line digital outputs.
//!
//! [`DigitalOutput`] drives a raw GPIO number through hw_init (no-op on
//! host).  [`PinOutput`] wraps any `embedded-hal` output pin, which is
//! how boards with a HAL-owned pin plug into the controller.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::app::ports::BinaryOutput;
use crate::drivers::hw_init;

/// Active-high GPIO line.
pub struct DigitalOutput {
    gpio: i32,
    level: bool,
}

impl DigitalOutput {
    pub fn new(gpio: i32) -> Self {
        Self { gpio, level: false }
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    pub fn is_high(&self) -> bool {
        self.level
    }
}

impl BinaryOutput for DigitalOutput {
    fn set(&mut self, on: bool) {
        hw_init::gpio_write(self.gpio, on);
        self.level = on;
    }
}

/// Any `embedded_hal::digital::OutputPin` as a [`BinaryOutput`].
pub struct PinOutput<P> {
    pin: P,
}

impl<P: OutputPin> PinOutput<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> BinaryOutput for PinOutput<P> {
    fn set(&mut self, on: bool) {
        let res = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if let Err(e) = res {
            warn!("Output pin write failed: {:?}", e);
        }
    }
}
