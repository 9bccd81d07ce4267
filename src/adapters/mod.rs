//! Environment adapters: wall clock, network identity, and (with the
//! `rpi` feature) the physical I2C bus.

pub mod clock;
#[cfg(feature = "rpi")]
pub mod lcd;
pub mod net;
