//! Dual-coil relay driver (forward / reverse outputs).
//!
//! A relay module with two coil lines can sit in one of four positions.
//! LED loads only use `Forward` (on) and `Off`.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives both coil GPIOs via hw_init helpers.
//! On host/test: tracks the position in memory only.

use crate::app::ports::BinaryOutput;
use crate::drivers::hw_init;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelayValue {
    /// Both coils released.
    #[default]
    Off,
    /// Both coils energised.
    On,
    Forward,
    Reverse,
}

impl RelayValue {
    /// Coil levels as `(forward, reverse)`.
    pub const fn coils(self) -> (bool, bool) {
        match self {
            Self::Off => (false, false),
            Self::On => (true, true),
            Self::Forward => (true, false),
            Self::Reverse => (false, true),
        }
    }
}

pub struct Relay {
    fwd_gpio: i32,
    rev_gpio: i32,
    value: RelayValue,
}

impl Relay {
    pub fn new(fwd_gpio: i32, rev_gpio: i32) -> Self {
        Self {
            fwd_gpio,
            rev_gpio,
            value: RelayValue::Off,
        }
    }

    pub fn set_value(&mut self, value: RelayValue) {
        let (fwd, rev) = value.coils();
        // Release before energise so both coils are never briefly
        // driven against each other.
        if !fwd {
            hw_init::gpio_write(self.fwd_gpio, false);
        }
        if !rev {
            hw_init::gpio_write(self.rev_gpio, false);
        }
        if fwd {
            hw_init::gpio_write(self.fwd_gpio, true);
        }
        if rev {
            hw_init::gpio_write(self.rev_gpio, true);
        }
        self.value = value;
    }

    pub fn value(&self) -> RelayValue {
        self.value
    }

    pub fn is_on(&self) -> bool {
        self.value != RelayValue::Off
    }
}

impl BinaryOutput for Relay {
    fn set(&mut self, on: bool) {
        self.set_value(if on { RelayValue::Forward } else { RelayValue::Off });
    }
}
