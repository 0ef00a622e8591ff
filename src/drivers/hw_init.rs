//! One-shot peripheral initialization for the LED outputs.
//!
//! Configures the GPIO outputs and the status UART for a profile using
//! raw ESP-IDF sys calls.  Called once when the hardware adapter is
//! acquired.  On host targets every call is a no-op stub so the rest of
//! the stack runs unchanged in tests.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use crate::config::LedProfile;
#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors while acquiring an output channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    UartConfigFailed(i32),
    UartInstallFailed(i32),
    /// A channel the profile requires was not provided.
    ChannelMissing(&'static str),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc)  => write!(f, "GPIO config failed (rc={})", rc),
            Self::UartConfigFailed(rc)  => write!(f, "UART config failed (rc={})", rc),
            Self::UartInstallFailed(rc) => write!(f, "UART driver install failed (rc={})", rc),
            Self::ChannelMissing(name)  => write!(f, "channel '{}' missing", name),
        }
    }
}

#[cfg(target_os = "espidf")]
use log::info;

/// Configure every pin the profile drives, all starting LOW.
#[cfg(target_os = "espidf")]
pub fn init_led_outputs(profile: LedProfile) -> Result<(), HwInitError> {
    // SAFETY: Called once while the adapter is being acquired, before the
    // tick loop starts; single-threaded.
    unsafe {
        init_gpio_outputs(profile)?;
        if profile == LedProfile::Relay {
            init_status_uart()?;
        }
    }
    info!("hw_init: {:?} outputs configured", profile);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_led_outputs(profile: LedProfile) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): {:?} output init skipped", profile);
    Ok(())
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
fn output_pins(profile: LedProfile) -> &'static [i32] {
    match profile {
        LedProfile::Relay => &[
            pins::DRIVER_LED_FWD_GPIO,
            pins::DRIVER_LED_REV_GPIO,
            pins::VISION_LAMP_FWD_GPIO,
            pins::VISION_LAMP_REV_GPIO,
        ],
        LedProfile::Digital => &[pins::DRIVER_LED_GPIO, pins::RANGE_LED_GPIO],
    }
}

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs(profile: LedProfile) -> Result<(), HwInitError> {
    for &pin in output_pins(profile) {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: GPIO outputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs().
    unsafe { gpio_set_level(pin, if high { 1 } else { 0 }); }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── Status UART ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_status_uart() -> Result<(), HwInitError> {
    let cfg = uart_config_t {
        baud_rate: pins::STATUS_UART_BAUD as i32,
        data_bits: uart_word_length_t_UART_DATA_8_BITS,
        parity: uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
        flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        ..Default::default()
    };
    let ret = unsafe { uart_param_config(pins::STATUS_UART_PORT, &cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::UartConfigFailed(ret)); }

    let ret = unsafe {
        uart_set_pin(
            pins::STATUS_UART_PORT,
            pins::STATUS_UART_TX_GPIO,
            pins::STATUS_UART_RX_GPIO,
            UART_PIN_NO_CHANGE,
            UART_PIN_NO_CHANGE,
        )
    };
    if ret != ESP_OK as i32 { return Err(HwInitError::UartConfigFailed(ret)); }

    // RX buffer must exceed the hardware FIFO; TX is unbuffered (blocking
    // writes of at most two bytes).
    let ret = unsafe {
        uart_driver_install(pins::STATUS_UART_PORT, 256, 0, 0, core::ptr::null_mut(), 0)
    };
    if ret != ESP_OK as i32 { return Err(HwInitError::UartInstallFailed(ret)); }

    info!("hw_init: status UART{} at {} baud", pins::STATUS_UART_PORT, pins::STATUS_UART_BAUD);
    Ok(())
}

/// Write raw bytes to a UART.  Returns the number of bytes queued.
#[cfg(target_os = "espidf")]
pub fn uart_write(port: i32, bytes: &[u8]) -> usize {
    // SAFETY: the driver for `port` was installed in init_status_uart();
    // the pointer/length pair comes from a valid slice.
    let ret = unsafe { uart_write_bytes(port, bytes.as_ptr().cast(), bytes.len()) };
    ret.max(0) as usize
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_write(_port: i32, bytes: &[u8]) -> usize {
    bytes.len()
}
