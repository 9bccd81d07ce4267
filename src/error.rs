//! Unified error types for the display plugin.
//!
//! A single `Error` enum that every subsystem can convert into, keeping
//! the dispatcher's error handling uniform. All variants are `Copy` so
//! they can be passed out of render threads without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level plugin error
// ---------------------------------------------------------------------------

/// Every fallible operation in the plugin funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A display-bus operation failed.
    Display(DisplayError),
    /// A configuration value is invalid or could not be parsed.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Display(e) => write!(f, "display: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Display errors
// ---------------------------------------------------------------------------

/// Errors raised by [`DisplayPort`](crate::app::ports::DisplayPort)
/// implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// The underlying I2C transaction failed.
    Bus,
    /// Cursor position outside the 4x20 geometry.
    InvalidPosition,
    /// Custom-glyph slot outside the controller's CGRAM (0-7).
    InvalidSlot,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus => write!(f, "I2C bus write failed"),
            Self::InvalidPosition => write!(f, "cursor position out of range"),
            Self::InvalidSlot => write!(f, "glyph slot out of range"),
        }
    }
}

impl std::error::Error for DisplayError {}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Self::Display(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Plugin-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
