//! Application core — pure domain logic, zero I/O.
//!
//! The LED controller's request handling, tick orchestration and output
//! reconciliation.  All interaction with hardware happens through the
//! **port traits** in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod reconciler;
pub mod service;
pub mod shared;
