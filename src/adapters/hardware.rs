//! Hardware adapter — bridges output drivers to the [`LedPort`] trait.
//!
//! Holds one optional [`BinaryOutput`] per [`Channel`] plus an optional
//! [`StatusTransport`].  [`LedHardware::acquire`] wires up the drivers a
//! profile needs; boards with their own pins build one with the
//! `with_*` methods instead.  On non-espidf targets the underlying
//! drivers use cfg-gated no-op stubs.

use log::info;

use crate::app::ports::{BinaryOutput, Channel, LedPort, StatusTransport};
use crate::config::LedProfile;
use crate::drivers::digital_out::DigitalOutput;
use crate::drivers::hw_init::{self, HwInitError};
use crate::drivers::relay::Relay;
use crate::drivers::serial::SerialPort;
use crate::error::Result;
use crate::pins;

type OutputSlot = Option<Box<dyn BinaryOutput + Send>>;

/// Concrete adapter that combines the output drivers behind [`LedPort`].
#[derive(Default)]
pub struct LedHardware {
    outputs: [OutputSlot; Channel::COUNT],
    status: Option<Box<dyn StatusTransport + Send>>,
}

impl LedHardware {
    /// Empty board: no channels, no status link.
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialise the peripherals for `profile` and attach its drivers.
    pub fn acquire(profile: LedProfile) -> Result<Self> {
        hw_init::init_led_outputs(profile)?;
        let hw = match profile {
            LedProfile::Relay => Self::new()
                .with_output(
                    Channel::Driver,
                    Relay::new(pins::DRIVER_LED_FWD_GPIO, pins::DRIVER_LED_REV_GPIO),
                )
                .with_output(
                    Channel::Lamp,
                    Relay::new(pins::VISION_LAMP_FWD_GPIO, pins::VISION_LAMP_REV_GPIO),
                )
                .with_status(SerialPort::new(pins::STATUS_UART_PORT)),
            LedProfile::Digital => Self::new()
                .with_output(Channel::Driver, DigitalOutput::new(pins::DRIVER_LED_GPIO))
                .with_output(Channel::Strip, DigitalOutput::new(pins::RANGE_LED_GPIO)),
        };
        hw.verify(profile)
    }

    pub fn with_output(
        mut self,
        channel: Channel,
        output: impl BinaryOutput + Send + 'static,
    ) -> Self {
        self.outputs[channel.index()] = Some(Box::new(output));
        self
    }

    pub fn with_status(mut self, transport: impl StatusTransport + Send + 'static) -> Self {
        self.status = Some(Box::new(transport));
        self
    }

    /// Check that every channel `profile` relies on is present.
    pub fn verify(self, profile: LedProfile) -> Result<Self> {
        let required: &[Channel] = match profile {
            LedProfile::Relay => &[Channel::Driver, Channel::Lamp],
            LedProfile::Digital => &[Channel::Driver, Channel::Strip],
        };
        if let Some(missing) = required.iter().find(|c| !self.has_channel(**c)) {
            return Err(HwInitError::ChannelMissing(missing.name()).into());
        }
        if profile == LedProfile::Relay && self.status.is_none() {
            return Err(HwInitError::ChannelMissing("StatusDisplay").into());
        }
        info!("LED hardware acquired for {:?} profile", profile);
        Ok(self)
    }
}

// ── LedPort implementation ────────────────────────────────────

impl LedPort for LedHardware {
    fn has_channel(&self, channel: Channel) -> bool {
        self.outputs[channel.index()].is_some()
    }

    fn set_level(&mut self, channel: Channel, on: bool) {
        if let Some(out) = self.outputs[channel.index()].as_mut() {
            out.set(on);
        }
    }

    fn has_status(&self) -> bool {
        self.status.is_some()
    }

    fn write_status(&mut self, bytes: &[u8]) {
        if let Some(link) = self.status.as_mut() {
            link.write(bytes);
        }
    }
}
