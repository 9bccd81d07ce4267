//! Character-ROM handling for HD44780-class controllers.
//!
//! The controller ships with one of two factory font ROMs:
//!
//! - **A00** — Japanese set. No uppercase umlauts and no sharp s, so
//!   those are uploaded as custom CGRAM glyphs and substituted into
//!   text as control codes before layout.
//! - **A02** — European set, close to Latin-1. Umlauts exist natively
//!   and text passes through untouched.
//!
//! Two custom glyphs are used for status icons regardless of ROM: a
//! beer mug (heating) and ice cubes (cooling).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

// ---------------------------------------------------------------------------
// ROM variant
// ---------------------------------------------------------------------------

/// Factory font ROM variant of the attached display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Charmap {
    /// Japanese ROM (katakana upper page); umlauts via CGRAM.
    A00,
    /// European ROM (Latin-1-like upper page).
    A02,
}

impl FromStr for Charmap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A00" => Ok(Self::A00),
            "A02" => Ok(Self::A02),
            _ => Err(Error::Config("unknown character map")),
        }
    }
}

impl Charmap {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A00 => "A00",
            Self::A02 => "A02",
        }
    }
}

// ---------------------------------------------------------------------------
// Custom CGRAM glyphs
// ---------------------------------------------------------------------------

/// CGRAM code of the beer-mug heating icon.
pub const GLYPH_MUG: u8 = 0x00;
/// CGRAM code of the ice-cube cooling icon.
pub const GLYPH_ICE: u8 = 0x01;
/// CGRAM codes of the A00 replacement letters.
pub const GLYPH_AE: u8 = 0x02;
pub const GLYPH_OE: u8 = 0x03;
pub const GLYPH_UE: u8 = 0x04;
pub const GLYPH_SS: u8 = 0x05;

/// 5x8 bitmap, one byte per pixel row, low 5 bits used.
pub type GlyphBitmap = [u8; 8];

const MUG: GlyphBitmap = [
    0b11100, 0b00000, 0b11100, 0b11111, 0b11101, 0b11101, 0b11111, 0b11100,
];

const ICE: GlyphBitmap = [
    0b00100, 0b10101, 0b01110, 0b11111, 0b01110, 0b10101, 0b00100, 0b00000,
];

const UPPER_AE: GlyphBitmap = [
    0b10001, 0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b00000,
];

const UPPER_OE: GlyphBitmap = [
    0b10001, 0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110, 0b00000,
];

const UPPER_UE: GlyphBitmap = [
    0b01010, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110, 0b00000,
];

const SHARP_S: GlyphBitmap = [
    0b00000, 0b00000, 0b11100, 0b10010, 0b10100, 0b10010, 0b11100, 0b10000,
];

/// Glyph table uploaded once at startup, indexed by CGRAM code.
pub const CUSTOM_GLYPHS: [(u8, GlyphBitmap); 6] = [
    (GLYPH_MUG, MUG),
    (GLYPH_ICE, ICE),
    (GLYPH_AE, UPPER_AE),
    (GLYPH_OE, UPPER_OE),
    (GLYPH_UE, UPPER_UE),
    (GLYPH_SS, SHARP_S),
];

// ---------------------------------------------------------------------------
// Text substitution
// ---------------------------------------------------------------------------

/// Replace letters the A00 ROM cannot draw with their CGRAM control
/// codes. Must run before layout so truncation counts the single-cell
/// control codes, not multi-byte characters.
///
/// A02 displays carry native glyphs and the text passes through as-is.
pub fn transliterate(text: &str, charmap: Charmap) -> String {
    match charmap {
        Charmap::A02 => text.to_owned(),
        Charmap::A00 => text
            .chars()
            .map(|c| match c {
                'Ä' => GLYPH_AE as char,
                'Ö' => GLYPH_OE as char,
                'Ü' => GLYPH_UE as char,
                'ß' => GLYPH_SS as char,
                other => other,
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// ROM byte encoding
// ---------------------------------------------------------------------------

/// Map a character to the data byte the controller ROM expects.
///
/// CGRAM codes 0-7 and printable ASCII pass through. The degree sign
/// and (on A00) the lowercase umlauts sit at ROM-specific addresses;
/// A02 additionally covers most of Latin-1 natively. Anything else
/// renders as `?`.
pub fn encode(c: char, charmap: Charmap) -> u8 {
    match c {
        '\u{00}'..='\u{07}' => c as u8,
        ' '..='}' => c as u8,
        _ => match charmap {
            Charmap::A00 => match c {
                '°' => 0xDF,
                'ä' => 0xE1,
                'ö' => 0xEF,
                'ü' => 0xF5,
                'ß' => 0xE2,
                '·' => 0xA5,
                _ => b'?',
            },
            Charmap::A02 => match c {
                '°' => 0xB0,
                '\u{A1}'..='\u{FF}' => c as u32 as u8,
                _ => b'?',
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a00_substitutes_control_codes() {
        let out = transliterate("Äpfel", Charmap::A00);
        let mut chars = out.chars();
        assert_eq!(chars.next(), Some('\u{02}'));
        assert_eq!(chars.as_str(), "pfel");
    }

    #[test]
    fn a00_substitutes_all_four() {
        let out = transliterate("ÄÖÜß", Charmap::A00);
        assert_eq!(out, "\u{02}\u{03}\u{04}\u{05}");
    }

    #[test]
    fn a02_passes_through() {
        assert_eq!(transliterate("Äpfel", Charmap::A02), "Äpfel");
    }

    #[test]
    fn glyph_table_covers_codes_0_to_5() {
        let codes: Vec<u8> = CUSTOM_GLYPHS.iter().map(|(c, _)| *c).collect();
        assert_eq!(codes, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn glyph_rows_fit_five_columns() {
        for (_, bitmap) in CUSTOM_GLYPHS {
            for row in bitmap {
                assert!(row <= 0b11111);
            }
        }
    }

    #[test]
    fn encode_ascii_and_degree() {
        assert_eq!(encode('A', Charmap::A00), b'A');
        assert_eq!(encode('°', Charmap::A00), 0xDF);
        assert_eq!(encode('°', Charmap::A02), 0xB0);
    }

    #[test]
    fn encode_a02_latin1() {
        assert_eq!(encode('Ä', Charmap::A02), 0xC4);
        assert_eq!(encode('ß', Charmap::A02), 0xDF);
    }

    #[test]
    fn encode_unknown_falls_back() {
        assert_eq!(encode('→', Charmap::A00), b'?');
        assert_eq!(encode('→', Charmap::A02), b'?');
    }

    #[test]
    fn charmap_parses() {
        assert_eq!("A00".parse::<Charmap>().unwrap(), Charmap::A00);
        assert_eq!("A02".parse::<Charmap>().unwrap(), Charmap::A02);
        assert!("A01".parse::<Charmap>().is_err());
    }
}
