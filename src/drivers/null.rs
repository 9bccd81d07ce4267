//! No-op display, substituted when probing the real panel fails.
//!
//! Keeps the whole render path alive for the process lifetime without a
//! panel attached; every write quietly succeeds.

use crate::app::ports::DisplayPort;
use crate::error::DisplayError;

pub struct NullDisplay;

impl DisplayPort for NullDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    fn write_at(&mut self, _row: u8, _col: u8, _text: &str) -> Result<(), DisplayError> {
        Ok(())
    }

    fn write_glyph(&mut self, _row: u8, _col: u8, _code: u8) -> Result<(), DisplayError> {
        Ok(())
    }

    fn define_glyph(&mut self, _slot: u8, _bitmap: [u8; 8]) -> Result<(), DisplayError> {
        Ok(())
    }
}
