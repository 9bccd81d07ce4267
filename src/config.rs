//! Panel configuration parameters.
//!
//! Five parameters live in the host's store under fixed keys. Each
//! resolver is lazy and idempotent: a present value is returned as-is,
//! an absent one is created with its documented default and read back.
//! All of them except the bus address and character map take effect
//! without a restart because the dispatcher re-resolves them per tick.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigPort;
use crate::charmap::Charmap;
use crate::error::Error;

// ---------------------------------------------------------------------------
// Value and parameter types
// ---------------------------------------------------------------------------

/// A stored parameter value. Hosts persist these, so the shape stays
/// serialization-friendly rather than fully typed per key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConfigValue {
    Text(String),
    Int(i64),
}

impl ConfigValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Int(_) => None,
        }
    }

    /// Integer view; numeric text parses too (hosts round-trip values
    /// through form fields).
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<i64> for ConfigValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

/// How the host should render the parameter in its settings UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterKind {
    /// Free-form text.
    Text,
    /// One of a fixed choice list.
    Select,
    /// A kettle picker.
    Kettle,
}

/// Creation metadata for one parameter. Serializes for hosts that
/// persist parameter definitions; the specs themselves are static.
#[derive(Debug, Clone, Serialize)]
pub struct ParameterSpec {
    pub key: &'static str,
    pub default: ConfigValue,
    pub kind: ParameterKind,
    pub description: &'static str,
    /// Allowed values for [`ParameterKind::Select`]; empty otherwise.
    pub choices: &'static [&'static str],
}

// ---------------------------------------------------------------------------
// The five recognized parameters
// ---------------------------------------------------------------------------

fn address_spec() -> ParameterSpec {
    ParameterSpec {
        key: "LCD_Address",
        default: ConfigValue::from("0x27"),
        kind: ParameterKind::Text,
        description: "I2C address of the LCD, restart required (probe with: sudo i2cdetect -y 1)",
        choices: &[],
    }
}

fn charmap_spec() -> ParameterSpec {
    ParameterSpec {
        key: "LCD_Charactermap",
        default: ConfigValue::from("A00"),
        kind: ParameterKind::Select,
        description: "Factory character ROM of the LCD; switch if characters look wrong, restart required",
        choices: &["A00", "A02"],
    }
}

fn refresh_spec() -> ParameterSpec {
    ParameterSpec {
        key: "LCD_Refresh",
        default: ConfigValue::from(3),
        kind: ParameterKind::Select,
        description: "Seconds each vessel stays on screen in multi mode, no restart required",
        choices: &["1", "2", "3", "4", "5", "6"],
    }
}

fn multidisplay_spec() -> ParameterSpec {
    ParameterSpec {
        key: "LCD_Multidisplay",
        default: ConfigValue::from("on"),
        kind: ParameterKind::Select,
        description: "Cycle through all kettles, or show a single kettle, no restart required",
        choices: &["on", "off"],
    }
}

fn single_kettle_spec() -> ParameterSpec {
    ParameterSpec {
        key: "LCD_Singledisplay",
        default: ConfigValue::from(1),
        kind: ParameterKind::Kettle,
        description: "Kettle shown in single mode, no restart required",
        choices: &[],
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Lazy create-then-read. Present values win; only an absent key gets
/// the default written, so calling this any number of times creates at
/// most one parameter.
fn resolve(cfg: &(impl ConfigPort + ?Sized), spec: &ParameterSpec) -> ConfigValue {
    if let Some(value) = cfg.get_parameter(spec.key) {
        debug!("{} = {:?}", spec.key, value);
        return value;
    }
    cfg.add_parameter(spec);
    let value = cfg
        .get_parameter(spec.key)
        .unwrap_or_else(|| spec.default.clone());
    info!("{} created with default {:?}", spec.key, value);
    value
}

/// Bus address as stored (hex string, e.g. `0x27`).
pub fn lcd_address(cfg: &(impl ConfigPort + ?Sized)) -> String {
    match resolve(cfg, &address_spec()) {
        ConfigValue::Text(s) => s,
        ConfigValue::Int(v) => format!("{v:#04x}"),
    }
}

/// Character ROM variant. Unparseable stored values fall back to A00.
pub fn charactermap(cfg: &(impl ConfigPort + ?Sized)) -> Charmap {
    let spec = charmap_spec();
    resolve(cfg, &spec)
        .as_str()
        .and_then(|s| s.parse().ok())
        .unwrap_or(Charmap::A00)
}

/// Per-vessel dwell in multi mode, clamped to the 1-6 s choice range.
pub fn refresh_secs(cfg: &(impl ConfigPort + ?Sized)) -> u64 {
    resolve(cfg, &refresh_spec())
        .as_int()
        .map_or(3, |v| v.clamp(1, 6) as u64)
}

/// Whether multi-kettle cycling is enabled.
pub fn multidisplay(cfg: &(impl ConfigPort + ?Sized)) -> bool {
    resolve(cfg, &multidisplay_spec())
        .as_str()
        .is_none_or(|s| s != "off")
}

/// Kettle id for single mode.
pub fn single_kettle_id(cfg: &(impl ConfigPort + ?Sized)) -> i64 {
    resolve(cfg, &single_kettle_spec()).as_int().unwrap_or(1)
}

// ---------------------------------------------------------------------------
// Host-owned unit parameter
// ---------------------------------------------------------------------------

/// Temperature unit shown after the degree sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TempUnit {
    Celsius,
    Fahrenheit,
}

impl TempUnit {
    pub fn symbol(self) -> char {
        match self {
            Self::Celsius => 'C',
            Self::Fahrenheit => 'F',
        }
    }
}

/// The host's global `unit` parameter. Owned by the host and never
/// created here; anything but `F` reads as Celsius.
pub fn display_unit(cfg: &(impl ConfigPort + ?Sized)) -> TempUnit {
    match cfg.get_parameter("unit").as_ref().and_then(ConfigValue::as_str) {
        Some("F") => TempUnit::Fahrenheit,
        _ => TempUnit::Celsius,
    }
}

/// Parse the stored bus address into a 7-bit I2C address.
pub fn parse_address(raw: &str) -> Result<u8, Error> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    u8::from_str_radix(digits, 16).map_err(|_| Error::Config("LCD_Address is not a hex address"))
}
