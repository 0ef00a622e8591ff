//! LED indicator subsystem library.
//!
//! Exposes the controller, its ports and adapters for integration
//! testing and for embedding in a larger firmware.  All ESP-IDF-specific
//! code is guarded by `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod blink;
pub mod config;
pub mod error;
pub mod fsm;
pub mod looper;
pub mod status;

pub mod adapters;
pub mod drivers;
pub mod pins;

#[cfg(target_os = "espidf")]
mod cs_shim;
