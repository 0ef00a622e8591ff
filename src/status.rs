//! Status codes for the serial-driven status display.
//!
//! The display controller on the far end of the serial link owns the
//! actual animations; we only send it a small integer as ASCII decimal.
//!
//! | Code | Pattern                 |
//! |------|-------------------------|
//! | 0    | Grey (off)              |
//! | 1    | Blue/yellow alternating |
//! | 2    | Yellow                  |
//! | 3    | Flashing yellow         |
//! | 4    | Fade green              |
//! | 5    | Flashing green          |
//! | 6    | Flashing red            |
//! | 7    | Red                     |
//! | 8    | Blue                    |
//! | 9    | Flashing blue           |
//! | 10   | Fade blue               |
//! | 11   | Yellow chasing blue     |

use core::fmt::{self, Write};

use serde::{Deserialize, Serialize};

/// One of the patterns the status display knows how to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum StatusCode {
    #[default]
    Off = 0,
    BlueYellowAlternating = 1,
    Yellow = 2,
    FlashingYellow = 3,
    FadeGreen = 4,
    FlashingGreen = 5,
    FlashingRed = 6,
    Red = 7,
    Blue = 8,
    FlashingBlue = 9,
    FadeBlue = 10,
    YellowChasingBlue = 11,
}

/// ASCII-decimal wire form of a status code (at most two digits).
pub type StatusBytes = heapless::String<3>;

impl StatusCode {
    pub const COUNT: usize = 12;

    /// Every code in wire order.
    pub const ALL: [StatusCode; Self::COUNT] = [
        Self::Off,
        Self::BlueYellowAlternating,
        Self::Yellow,
        Self::FlashingYellow,
        Self::FadeGreen,
        Self::FlashingGreen,
        Self::FlashingRed,
        Self::Red,
        Self::Blue,
        Self::FlashingBlue,
        Self::FadeBlue,
        Self::YellowChasingBlue,
    ];

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::BlueYellowAlternating => "BlueYellowAlternating",
            Self::Yellow => "Yellow",
            Self::FlashingYellow => "FlashingYellow",
            Self::FadeGreen => "FadeGreen",
            Self::FlashingGreen => "FlashingGreen",
            Self::FlashingRed => "FlashingRed",
            Self::Red => "Red",
            Self::Blue => "Blue",
            Self::FlashingBlue => "FlashingBlue",
            Self::FadeBlue => "FadeBlue",
            Self::YellowChasingBlue => "YellowChasingBlue",
        }
    }

    /// Encode as the ASCII decimal string sent over the wire.
    pub fn encode(self) -> StatusBytes {
        let mut s = StatusBytes::new();
        // Two digits always fit in three bytes.
        let _ = write!(s, "{}", self.code());
        s
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
