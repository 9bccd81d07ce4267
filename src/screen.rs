//! Fixed-geometry frame assembly for the 20x4 panel.
//!
//! Renderers build a [`ScreenFrame`] (four full-width lines plus up to
//! two icon cells) and present it to a
//! [`DisplayPort`](crate::app::ports::DisplayPort) in one pass. Lines
//! are always padded to the full 20 columns so stale characters from a
//! previous screen never survive a redraw.

use crate::app::ports::DisplayPort;
use crate::error::DisplayError;

/// Number of character rows on the panel.
pub const SCREEN_ROWS: usize = 4;

/// Number of character columns on the panel.
pub const SCREEN_COLS: usize = 20;

/// Column of the primary status icon (heating), top row.
pub const ICON_COL_PRIMARY: u8 = 19;

/// Column of the secondary status icon (cooling), top row.
pub const ICON_COL_SECONDARY: u8 = 18;

/// Truncate to `width` display cells and right-pad with spaces.
///
/// Counts characters, not bytes: substitution control codes and the
/// degree sign each occupy one cell.
pub fn fit(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let used = out.chars().count();
    out.extend(core::iter::repeat_n(' ', width - used));
    out
}

/// One fully laid-out screen, ready to write to the panel.
#[derive(Debug, Clone, Default)]
pub struct ScreenFrame {
    lines: [String; SCREEN_ROWS],
    /// Icon cells on the top row: `[0]` at column 19, `[1]` at 18.
    icons: [Option<u8>; 2],
}

impl ScreenFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one row, truncated and padded to the panel width.
    pub fn set_line(&mut self, row: usize, text: &str) {
        if row < SCREEN_ROWS {
            self.lines[row] = fit(text, SCREEN_COLS);
        }
    }

    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(String::as_str)
    }

    /// Place the primary (heating) icon at the top-right cell.
    pub fn set_primary_icon(&mut self, code: u8) {
        self.icons[0] = Some(code);
    }

    /// Place the secondary (cooling) icon left of the primary cell.
    pub fn set_secondary_icon(&mut self, code: u8) {
        self.icons[1] = Some(code);
    }

    /// Write the frame: rows top to bottom, then icon cells.
    ///
    /// Empty rows still clear their line because [`set_line`] pads to
    /// the full width and `Default` rows render as blanks.
    pub fn present(&self, display: &mut dyn DisplayPort) -> Result<(), DisplayError> {
        for (row, line) in self.lines.iter().enumerate() {
            let padded;
            let text = if line.is_empty() {
                padded = fit("", SCREEN_COLS);
                padded.as_str()
            } else {
                line.as_str()
            };
            display.write_at(row as u8, 0, text)?;
        }
        if let Some(code) = self.icons[0] {
            display.write_glyph(0, ICON_COL_PRIMARY, code)?;
        }
        if let Some(code) = self.icons[1] {
            display.write_glyph(0, ICON_COL_SECONDARY, code)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingDisplay {
        writes: Vec<(u8, u8, String)>,
        glyphs: Vec<(u8, u8, u8)>,
    }

    impl DisplayPort for RecordingDisplay {
        fn clear(&mut self) -> Result<(), DisplayError> {
            Ok(())
        }

        fn write_at(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
            self.writes.push((row, col, text.to_owned()));
            Ok(())
        }

        fn write_glyph(&mut self, row: u8, col: u8, code: u8) -> Result<(), DisplayError> {
            self.glyphs.push((row, col, code));
            Ok(())
        }

        fn define_glyph(&mut self, _slot: u8, _bitmap: [u8; 8]) -> Result<(), DisplayError> {
            Ok(())
        }
    }

    #[test]
    fn fit_pads_and_truncates() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 5), "abcde");
        assert_eq!(fit("", 3), "   ");
    }

    #[test]
    fn fit_counts_cells_not_bytes() {
        // degree sign is two bytes but one display cell
        let line = fit("66.50°C", 20);
        assert_eq!(line.chars().count(), 20);
    }

    #[test]
    fn present_writes_rows_and_icons() {
        let mut frame = ScreenFrame::new();
        frame.set_line(0, "Mash In");
        frame.set_line(3, "Curr. Temp: No Data");
        frame.set_primary_icon(0x00);
        frame.set_secondary_icon(0x01);

        let mut d = RecordingDisplay::default();
        frame.present(&mut d).unwrap();

        assert_eq!(d.writes.len(), SCREEN_ROWS);
        assert_eq!(d.writes[0], (0, 0, fit("Mash In", SCREEN_COLS)));
        // untouched rows still blank their line
        assert_eq!(d.writes[1].2, " ".repeat(SCREEN_COLS));
        assert_eq!(d.glyphs, vec![(0, 19, 0x00), (0, 18, 0x01)]);
    }

    #[test]
    fn every_line_is_exactly_panel_width() {
        let mut frame = ScreenFrame::new();
        frame.set_line(0, "a 25-character line padded!!!");
        frame.set_line(1, "x");
        let mut d = RecordingDisplay::default();
        frame.present(&mut d).unwrap();
        for (_, _, text) in &d.writes {
            assert_eq!(text.chars().count(), SCREEN_COLS);
        }
    }
}
