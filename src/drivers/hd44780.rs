//! HD44780 character controller behind a PCF8574 I2C expander.
//!
//! The classic 20x4 backpack module: the expander's low nibble carries
//! the control lines (RS, R/W, EN, backlight) and the high nibble the
//! data, so every controller byte goes out as two strobed nibbles.
//! Consecutive expander bytes are batched into single I2C transactions;
//! at bus speed each byte takes longer on the wire than the controller
//! needs to execute it, so only clear/home get an explicit settle
//! delay.
//!
//! Generic over [`embedded_hal::i2c::I2c`] and
//! [`embedded_hal::delay::DelayNs`], so the same driver runs on a Pi
//! (`linux-embedded-hal`) and under test against a mock bus.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use heapless::Vec;

use crate::app::ports::DisplayPort;
use crate::charmap::{encode, Charmap};
use crate::error::DisplayError;
use crate::screen::{SCREEN_COLS, SCREEN_ROWS};

// Expander control lines (standard backpack wiring)
const RS: u8 = 0b0000_0001;
const EN: u8 = 0b0000_0100;
const BACKLIGHT: u8 = 0b0000_1000;

// Controller commands
const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_INCREMENT: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const CMD_SET_CGRAM: u8 = 0x40;
const CMD_SET_DDRAM: u8 = 0x80;

/// DDRAM start address per row on 20x4 modules (rows interleave).
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// Largest burst: cursor command plus one full row of data.
const BURST: usize = 4 * (1 + SCREEN_COLS);

pub struct Hd44780<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    charmap: Charmap,
    backlight: bool,
}

impl<I2C, D> Hd44780<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    pub fn new(i2c: I2C, delay: D, address: u8, charmap: Charmap) -> Self {
        Self {
            i2c,
            delay,
            address,
            charmap,
            backlight: true,
        }
    }

    /// Run the datasheet power-on sequence and configure 4-bit mode,
    /// two logical lines, 5x8 font, cursor off.
    pub fn init(mut self) -> Result<Self, DisplayError> {
        self.delay.delay_ms(50);

        // Three 8-bit function-set strobes force a known state, then
        // the interface drops to 4 bits.
        for settle_ms in [5, 1, 1] {
            self.strobe_nibble(0x30)?;
            self.delay.delay_ms(settle_ms);
        }
        self.strobe_nibble(0x20)?;
        self.delay.delay_ms(1);

        self.command(CMD_FUNCTION_4BIT_2LINE)?;
        self.command(CMD_DISPLAY_ON)?;
        self.clear_panel()?;
        self.command(CMD_ENTRY_INCREMENT)?;
        Ok(self)
    }

    pub fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        self.backlight = on;
        let flags = self.flags(false);
        self.i2c
            .write(self.address, &[flags])
            .map_err(|_| DisplayError::Bus)
    }

    // ── Internal ──────────────────────────────────────────────

    fn flags(&self, rs: bool) -> u8 {
        (if rs { RS } else { 0 }) | (if self.backlight { BACKLIGHT } else { 0 })
    }

    /// Append one controller byte as two strobed nibbles.
    fn push_byte(burst: &mut Vec<u8, BURST>, byte: u8, flags: u8) {
        for nibble in [byte & 0xF0, (byte << 4) & 0xF0] {
            let _ = burst.push(nibble | flags | EN);
            let _ = burst.push(nibble | flags);
        }
    }

    fn send(&mut self, burst: &[u8]) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, burst)
            .map_err(|_| DisplayError::Bus)?;
        self.delay.delay_us(50);
        Ok(())
    }

    /// Single high-nibble strobe, used only by the reset sequence.
    fn strobe_nibble(&mut self, nibble: u8) -> Result<(), DisplayError> {
        let flags = self.flags(false);
        self.i2c
            .write(self.address, &[nibble | flags | EN, nibble | flags])
            .map_err(|_| DisplayError::Bus)
    }

    fn command(&mut self, byte: u8) -> Result<(), DisplayError> {
        let mut burst: Vec<u8, BURST> = Vec::new();
        Self::push_byte(&mut burst, byte, self.flags(false));
        self.send(&burst)
    }

    fn clear_panel(&mut self) -> Result<(), DisplayError> {
        self.command(CMD_CLEAR)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    fn cursor_command(row: u8, col: u8) -> Result<u8, DisplayError> {
        if usize::from(row) >= SCREEN_ROWS || usize::from(col) >= SCREEN_COLS {
            return Err(DisplayError::InvalidPosition);
        }
        Ok(CMD_SET_DDRAM | (ROW_OFFSETS[usize::from(row)] + col))
    }
}

impl<I2C, D> DisplayPort for Hd44780<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.clear_panel()
    }

    fn write_at(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        let cursor = Self::cursor_command(row, col)?;
        let data_flags = self.flags(true);
        let cmd_flags = self.flags(false);

        let mut burst: Vec<u8, BURST> = Vec::new();
        Self::push_byte(&mut burst, cursor, cmd_flags);
        let room = SCREEN_COLS - usize::from(col);
        for c in text.chars().take(room) {
            Self::push_byte(&mut burst, encode(c, self.charmap), data_flags);
        }
        self.send(&burst)
    }

    fn write_glyph(&mut self, row: u8, col: u8, code: u8) -> Result<(), DisplayError> {
        let cursor = Self::cursor_command(row, col)?;
        let mut burst: Vec<u8, BURST> = Vec::new();
        Self::push_byte(&mut burst, cursor, self.flags(false));
        Self::push_byte(&mut burst, code, self.flags(true));
        self.send(&burst)
    }

    fn define_glyph(&mut self, slot: u8, bitmap: [u8; 8]) -> Result<(), DisplayError> {
        if slot >= 8 {
            return Err(DisplayError::InvalidSlot);
        }
        let cmd_flags = self.flags(false);
        let data_flags = self.flags(true);

        let mut burst: Vec<u8, BURST> = Vec::new();
        Self::push_byte(&mut burst, CMD_SET_CGRAM | (slot << 3), cmd_flags);
        for line in bitmap {
            Self::push_byte(&mut burst, line, data_flags);
        }
        // Leave the address counter back in DDRAM.
        Self::push_byte(&mut burst, CMD_SET_DDRAM, cmd_flags);
        self.send(&burst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct MockBusError;

    impl embedded_hal::i2c::Error for MockBusError {
        fn kind(&self) -> embedded_hal::i2c::ErrorKind {
            embedded_hal::i2c::ErrorKind::Other
        }
    }

    /// Records every I2C write; reads are unused by the driver.
    #[derive(Default)]
    struct MockBus {
        writes: std::vec::Vec<(u8, std::vec::Vec<u8>)>,
        fail: bool,
    }

    impl embedded_hal::i2c::ErrorType for MockBus {
        type Error = MockBusError;
    }

    impl I2c for MockBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [embedded_hal::i2c::Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(MockBusError);
            }
            for op in operations {
                if let embedded_hal::i2c::Operation::Write(bytes) = op {
                    self.writes.push((address, bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    struct MockDelay;

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn make() -> Hd44780<MockBus, MockDelay> {
        Hd44780::new(MockBus::default(), MockDelay, 0x27, Charmap::A00)
    }

    /// Reassemble controller bytes from strobed expander traffic.
    fn decode_bytes(frames: &[(u8, std::vec::Vec<u8>)]) -> std::vec::Vec<(u8, bool)> {
        let mut nibbles: std::vec::Vec<(u8, bool)> = std::vec::Vec::new();
        for (_, frame) in frames {
            for b in frame {
                if b & EN != 0 {
                    nibbles.push((b & 0xF0, b & RS != 0));
                }
            }
        }
        nibbles
            .chunks(2)
            .filter(|pair| pair.len() == 2)
            .map(|pair| (pair[0].0 | (pair[1].0 >> 4), pair[0].1))
            .collect()
    }

    #[test]
    fn init_ends_in_4bit_configured_state() {
        let lcd = make().init().unwrap();
        let decoded = decode_bytes(&lcd.i2c.writes);
        // after the reset strobes: function set, display on, clear, entry
        assert!(decoded.contains(&(CMD_FUNCTION_4BIT_2LINE, false)));
        assert!(decoded.contains(&(CMD_DISPLAY_ON, false)));
        assert!(decoded.contains(&(CMD_CLEAR, false)));
        assert!(decoded.contains(&(CMD_ENTRY_INCREMENT, false)));
    }

    #[test]
    fn write_at_addresses_the_interleaved_rows() {
        let mut lcd = make().init().unwrap();
        lcd.i2c.writes.clear();
        lcd.write_at(2, 3, "A").unwrap();
        let decoded = decode_bytes(&lcd.i2c.writes);
        assert_eq!(decoded[0], (CMD_SET_DDRAM | (0x14 + 3), false));
        assert_eq!(decoded[1], (b'A', true));
    }

    #[test]
    fn write_at_clips_at_row_end() {
        let mut lcd = make().init().unwrap();
        lcd.i2c.writes.clear();
        lcd.write_at(0, 18, "abcdef").unwrap();
        let decoded = decode_bytes(&lcd.i2c.writes);
        // cursor + two chars that fit in columns 18 and 19
        assert_eq!(decoded.len(), 3);
    }

    #[test]
    fn write_at_rejects_bad_positions() {
        let mut lcd = make().init().unwrap();
        assert_eq!(
            lcd.write_at(4, 0, "x"),
            Err(DisplayError::InvalidPosition)
        );
        assert_eq!(
            lcd.write_at(0, 20, "x"),
            Err(DisplayError::InvalidPosition)
        );
    }

    #[test]
    fn define_glyph_uploads_to_cgram() {
        let mut lcd = make().init().unwrap();
        lcd.i2c.writes.clear();
        let bitmap = [0b11100, 0, 0b11100, 0b11111, 0b11101, 0b11101, 0b11111, 0b11100];
        lcd.define_glyph(2, bitmap).unwrap();
        let decoded = decode_bytes(&lcd.i2c.writes);
        assert_eq!(decoded[0], (CMD_SET_CGRAM | (2 << 3), false));
        for (i, line) in bitmap.iter().enumerate() {
            assert_eq!(decoded[1 + i], (*line, true));
        }
        // address counter returned to DDRAM
        assert_eq!(decoded.last().copied(), Some((CMD_SET_DDRAM, false)));
    }

    #[test]
    fn define_glyph_rejects_bad_slot() {
        let mut lcd = make().init().unwrap();
        assert_eq!(
            lcd.define_glyph(8, [0; 8]),
            Err(DisplayError::InvalidSlot)
        );
    }

    #[test]
    fn text_is_rom_encoded() {
        let mut lcd = make().init().unwrap();
        lcd.i2c.writes.clear();
        lcd.write_at(0, 0, "1°").unwrap();
        let decoded = decode_bytes(&lcd.i2c.writes);
        assert_eq!(decoded[1], (b'1', true));
        assert_eq!(decoded[2], (0xDF, true)); // degree sign on the A00 ROM
    }

    #[test]
    fn bus_failure_surfaces_as_display_error() {
        let mut lcd = make().init().unwrap();
        lcd.i2c.fail = true;
        assert_eq!(lcd.write_at(0, 0, "x"), Err(DisplayError::Bus));
    }
}
