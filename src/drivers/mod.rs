//! Output drivers and hardware initialisation.

pub mod digital_out;
pub mod hw_init;
pub mod relay;
pub mod serial;
