//! Physical bus adapter for Raspberry Pi class hardware.
//!
//! Opens the Pi's user I2C bus and hands back an initialized HD44780
//! driver as a boxed [`DisplayPort`]. Shaped as a probe closure for
//! [`DisplayService::init`](crate::app::service::DisplayService::init)
//! so the service never touches device paths.

use anyhow::Context;
use linux_embedded_hal::{Delay, I2cdev};

use crate::app::ports::DisplayPort;
use crate::charmap::Charmap;
use crate::drivers::hd44780::Hd44780;

/// The Pi's external I2C bus (GPIO 2/3).
const I2C_BUS: &str = "/dev/i2c-1";

/// Open the bus and bring the panel up at `address`.
pub fn probe(address: u8, charmap: Charmap) -> anyhow::Result<Box<dyn DisplayPort + Send>> {
    let bus = I2cdev::new(I2C_BUS).with_context(|| format!("opening {I2C_BUS}"))?;
    let lcd = Hd44780::new(bus, Delay, address, charmap)
        .init()
        .with_context(|| format!("initializing LCD at {address:#04x}"))?;
    Ok(Box::new(lcd))
}
