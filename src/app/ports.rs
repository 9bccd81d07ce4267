//! Port traits — the hexagonal boundary between the display logic and
//! the outside world.
//!
//! ```text
//!   Host bridge ──▶ Port trait ──▶ DisplayService (domain)
//! ```
//!
//! The host controller implements the driven ports (configuration,
//! entity cache, sensors, notifications, clock, identity); display
//! drivers implement [`DisplayPort`]. The service consumes all of them
//! through one [`Host`] handle so background render threads can share
//! it.
//!
//! ## Degradation contracts
//!
//! - A sensor read that yields no numeric value returns `None`; the
//!   renderers translate that into a "No Data" line, never an error.
//! - An actor id that resolves to nothing reads as "off".
//! - Configuration lookups never fail: absent keys are created with
//!   their documented default by the resolver.

use chrono::{DateTime, Local};

use crate::app::snapshot::{BrewSnapshot, SensorId};
use crate::config::{ConfigValue, ParameterSpec};
use crate::error::DisplayError;

// ───────────────────────────────────────────────────────────────
// Configuration port (driven: host parameter store)
// ───────────────────────────────────────────────────────────────

/// Read/create access to the host's named configuration parameters.
///
/// `add_parameter` is only issued after a failed `get_parameter`, so a
/// racing double-create must be harmless; stores that keep the first
/// write win satisfy that trivially.
pub trait ConfigPort {
    /// Look up a parameter. `None` when the key has never been created.
    fn get_parameter(&self, key: &str) -> Option<ConfigValue>;

    /// Create a parameter with its default value and metadata.
    fn add_parameter(&self, spec: &ParameterSpec);
}

// ───────────────────────────────────────────────────────────────
// Cache port (driven: host entity cache)
// ───────────────────────────────────────────────────────────────

/// Read-only snapshot access to the host's live entities.
///
/// One snapshot is taken per rendered frame; the host keeps mutating
/// its own copies while renders run.
pub trait CachePort {
    fn snapshot(&self) -> BrewSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Sensor port (driven: host sensor engine)
// ───────────────────────────────────────────────────────────────

/// Current numeric reading of a sensor, `None` when the sensor is
/// unknown or has not delivered a value yet.
pub trait SensorPort {
    fn sensor_value(&self, sensor: SensorId) -> Option<f64>;
}

// ───────────────────────────────────────────────────────────────
// Notification port (driven: host notification center)
// ───────────────────────────────────────────────────────────────

/// Severity of a host notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    Info,
    Warning,
    Danger,
}

/// Fire-and-forget user notification. Used exactly once, when display
/// initialization fails.
pub trait NotifyPort {
    fn notify(&self, headline: &str, message: &str, kind: NotifyKind, timeout_secs: Option<u32>);
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven: wall clock)
// ───────────────────────────────────────────────────────────────

/// Wall-clock access, injectable so timer math is testable.
pub trait ClockPort {
    /// Seconds since the Unix epoch.
    fn epoch_secs(&self) -> i64;

    /// Current local date-time for the standby screen.
    fn local_now(&self) -> DateTime<Local>;
}

// ───────────────────────────────────────────────────────────────
// Host identity port
// ───────────────────────────────────────────────────────────────

/// Name and version of the hosting controller, shown on standby.
pub trait HostInfoPort {
    fn app_name(&self) -> String;
    fn app_version(&self) -> String;
}

// ───────────────────────────────────────────────────────────────
// Combined host handle
// ───────────────────────────────────────────────────────────────

/// Everything the plugin consumes from its host, as one shareable
/// object. Blanket-implemented for any type providing all ports.
pub trait Host:
    ConfigPort + CachePort + SensorPort + NotifyPort + ClockPort + HostInfoPort + Send + Sync
{
}

impl<T> Host for T where
    T: ConfigPort + CachePort + SensorPort + NotifyPort + ClockPort + HostInfoPort + Send + Sync
{
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → panel hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the 20x4 character panel.
///
/// Text passed to `write_at` is already transliterated for the active
/// character ROM; implementations encode each char to its ROM byte.
pub trait DisplayPort {
    /// Blank the whole panel.
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Write text starting at `(row, col)`, clipped at the row end.
    fn write_at(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Write one raw glyph code (CGRAM icon) at `(row, col)`.
    fn write_glyph(&mut self, row: u8, col: u8, code: u8) -> Result<(), DisplayError>;

    /// Upload a 5x8 custom glyph into CGRAM slot 0-7.
    fn define_glyph(&mut self, slot: u8, bitmap: [u8; 8]) -> Result<(), DisplayError>;
}

/// The display handle as shared between the dispatch thread and
/// background cycle threads. The mutex is held per frame, so
/// concurrent renders serialize at frame granularity.
pub type SharedDisplay = std::sync::Arc<std::sync::Mutex<Box<dyn DisplayPort + Send>>>;

/// Lock the shared display, recovering a poisoned lock; the next frame
/// rewrites every cell anyway.
pub fn lock_display(
    display: &SharedDisplay,
) -> std::sync::MutexGuard<'_, Box<dyn DisplayPort + Send>> {
    match display.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
