//! The display session and its periodic dispatcher.
//!
//! [`DisplayService`] is constructed once at host startup and ticked on
//! a fixed host-driven interval (0.7 s works well). Each tick picks one
//! of four screens from live state:
//!
//! ```text
//!  no step, no fermentation ──▶ Standby          (sync, this thread)
//!  step + multidisplay on   ──▶ MultiKettle      (guarded bg thread)
//!  step + multidisplay off  ──▶ SingleKettle     (sync, blink toggle)
//!  fermentation task active ──▶ Fermentation     (guarded bg thread)
//! ```
//!
//! The cycling screens dwell several seconds per vessel and easily
//! outlast a tick, so each role carries an atomic in-progress flag:
//! set before the thread spawns, cleared when it exits. A tick that
//! lands mid-cycle starts nothing. Mode changes never interrupt an
//! in-flight cycle; they only stop the next one from starting.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use log::{debug, info, warn};

use crate::app::ports::{lock_display, DisplayPort, Host, NotifyKind, SharedDisplay};
use crate::app::snapshot::BrewSnapshot;
use crate::charmap::CUSTOM_GLYPHS;
use crate::config;
use crate::drivers::null::NullDisplay;
use crate::render::{fermenter, kettle, standby, RenderCtx};

// ───────────────────────────────────────────────────────────────
// Screen selection
// ───────────────────────────────────────────────────────────────

/// The four panel views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenMode {
    Standby,
    SingleKettle,
    MultiKettle,
    Fermentation,
}

/// Pick the screen for this tick. Evaluated fresh every time; the
/// dispatcher keeps no mode memory between ticks.
pub fn select_mode(snap: &BrewSnapshot, multidisplay: bool) -> ScreenMode {
    let brewing = snap.active_step.is_some();
    if !brewing && !snap.fermentation_active() {
        ScreenMode::Standby
    } else if brewing && multidisplay {
        ScreenMode::MultiKettle
    } else if brewing {
        ScreenMode::SingleKettle
    } else {
        ScreenMode::Fermentation
    }
}

// ───────────────────────────────────────────────────────────────
// Cycle roles
// ───────────────────────────────────────────────────────────────

/// Identity of a background cycling render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CycleRole {
    Kettles,
    Fermenters,
}

impl CycleRole {
    /// Thread name, for log readability only; the in-progress guard is
    /// the atomic flag, not the name.
    fn thread_name(self) -> &'static str {
        match self {
            Self::Kettles => "multidisplay",
            Self::Fermenters => "fermentation-multidisplay",
        }
    }
}

// ───────────────────────────────────────────────────────────────
// DisplayService
// ───────────────────────────────────────────────────────────────

/// Session state for one attached panel.
///
/// Owns everything the original ad-hoc globals carried: the display
/// handle, the resolved character map and unit, the single-kettle
/// blink flag, and the per-role cycle guards.
pub struct DisplayService {
    host: Arc<dyn Host>,
    display: SharedDisplay,
    ctx: RenderCtx,
    blink: bool,
    kettle_cycle: Arc<AtomicBool>,
    fermenter_cycle: Arc<AtomicBool>,
}

impl DisplayService {
    /// Resolve configuration, probe the display and register glyphs.
    ///
    /// `probe` turns a parsed 7-bit bus address into a live display
    /// driver. If the address does not parse, the probe fails, or a
    /// glyph upload fails, the host is notified once and the service
    /// continues with a no-op display for the rest of the process
    /// lifetime. Initialization itself never fails.
    pub fn init<F>(host: Arc<dyn Host>, probe: F) -> Self
    where
        F: FnOnce(u8) -> anyhow::Result<Box<dyn DisplayPort + Send>>,
    {
        let h = host.as_ref();
        let address = config::lcd_address(h);
        let charmap = config::charactermap(h);
        let refresh = config::refresh_secs(h);
        let multidisplay = config::multidisplay(h);
        let kettle_id = config::single_kettle_id(h);
        let unit = config::display_unit(h);
        info!(
            "panel config: address={address} charmap={} refresh={refresh}s \
             multidisplay={multidisplay} kettle={kettle_id} unit={}",
            charmap.as_str(),
            unit.symbol()
        );

        let opened = config::parse_address(&address)
            .map_err(anyhow::Error::from)
            .and_then(probe)
            .and_then(|mut display| {
                for (slot, bitmap) in CUSTOM_GLYPHS {
                    display
                        .define_glyph(slot, bitmap)
                        .map_err(anyhow::Error::from)?;
                }
                Ok(display)
            });

        let display: Box<dyn DisplayPort + Send> = match opened {
            Ok(display) => {
                info!("panel ready at {address}");
                display
            }
            Err(e) => {
                warn!("display init failed: {e:#}; continuing without panel");
                host.notify(
                    "LCD unavailable",
                    "Check the LCD_Address parameter; probe the bus with: sudo i2cdetect -y 1",
                    NotifyKind::Danger,
                    None,
                );
                Box::new(NullDisplay)
            }
        };

        Self {
            host,
            display: Arc::new(Mutex::new(display)),
            ctx: RenderCtx { charmap, unit },
            blink: false,
            kettle_cycle: Arc::new(AtomicBool::new(false)),
            fermenter_cycle: Arc::new(AtomicBool::new(false)),
        }
    }

    /// One dispatcher tick.
    ///
    /// Refresh, multidisplay mode and the single-kettle id are
    /// re-resolved here so they take effect without a restart.
    pub fn tick(&mut self) {
        let host = Arc::clone(&self.host);
        let refresh = config::refresh_secs(host.as_ref());
        let multidisplay = config::multidisplay(host.as_ref());
        let snap = host.snapshot();

        match select_mode(&snap, multidisplay) {
            ScreenMode::Standby => {
                let mut panel = lock_display(&self.display);
                if let Err(e) = standby::render(host.as_ref(), &self.ctx, panel.as_mut()) {
                    warn!("standby render failed: {e}");
                }
            }
            ScreenMode::SingleKettle => {
                let kettle_id = config::single_kettle_id(host.as_ref());
                let hide_icon = self.blink;
                self.blink = !self.blink;
                let mut panel = lock_display(&self.display);
                if let Err(e) = kettle::render_single(
                    host.as_ref(),
                    &self.ctx,
                    panel.as_mut(),
                    kettle_id,
                    hide_icon,
                ) {
                    warn!("single kettle render failed: {e}");
                }
            }
            ScreenMode::MultiKettle => self.spawn_cycle(CycleRole::Kettles, refresh),
            ScreenMode::Fermentation => self.spawn_cycle(CycleRole::Fermenters, refresh),
        }
    }

    /// Whether a cycle of either role is currently in flight.
    pub fn cycle_in_flight(&self) -> bool {
        self.kettle_cycle.load(Ordering::SeqCst) || self.fermenter_cycle.load(Ordering::SeqCst)
    }

    // ── Internal ──────────────────────────────────────────────

    /// Launch a cycling render unless one with the same role is still
    /// running. The guard flips in the same atomic op that checks it,
    /// so two racing ticks cannot both spawn.
    fn spawn_cycle(&self, role: CycleRole, refresh_secs: u64) {
        let guard = match role {
            CycleRole::Kettles => &self.kettle_cycle,
            CycleRole::Fermenters => &self.fermenter_cycle,
        };
        if guard.swap(true, Ordering::SeqCst) {
            debug!("{} cycle already in flight", role.thread_name());
            return;
        }

        let guard = Arc::clone(guard);
        let guard_for_thread = Arc::clone(&guard);
        let host = Arc::clone(&self.host);
        let display = Arc::clone(&self.display);
        let ctx = self.ctx;

        let spawned = thread::Builder::new()
            .name(role.thread_name().to_owned())
            .spawn(move || {
                let outcome = match role {
                    CycleRole::Kettles => kettle::cycle(host.as_ref(), &display, &ctx, refresh_secs),
                    CycleRole::Fermenters => {
                        fermenter::cycle(host.as_ref(), &display, &ctx, refresh_secs)
                    }
                };
                if let Err(e) = outcome {
                    warn!("{} cycle aborted: {e}", role.thread_name());
                }
                guard_for_thread.store(false, Ordering::SeqCst);
            });

        if let Err(e) = spawned {
            warn!("failed to spawn {}: {e}", role.thread_name());
            guard.store(false, Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::snapshot::{ActiveStep, FermenterTask, TaskState};

    fn step() -> Option<ActiveStep> {
        Some(ActiveStep {
            name: "Boil".into(),
            timer_end: None,
        })
    }

    fn active_task() -> FermenterTask {
        FermenterTask {
            fermenter_id: 1,
            timer_start: Some(0),
            state: TaskState::Active,
        }
    }

    #[test]
    fn idle_selects_standby() {
        let snap = BrewSnapshot::default();
        assert_eq!(select_mode(&snap, true), ScreenMode::Standby);
        assert_eq!(select_mode(&snap, false), ScreenMode::Standby);
    }

    #[test]
    fn brewing_with_multidisplay_cycles_kettles() {
        let snap = BrewSnapshot {
            active_step: step(),
            ..Default::default()
        };
        assert_eq!(select_mode(&snap, true), ScreenMode::MultiKettle);
    }

    #[test]
    fn brewing_without_multidisplay_pins_one_kettle() {
        let snap = BrewSnapshot {
            active_step: step(),
            ..Default::default()
        };
        assert_eq!(select_mode(&snap, false), ScreenMode::SingleKettle);
    }

    #[test]
    fn fermentation_without_step_selects_fermentation() {
        let snap = BrewSnapshot {
            fermenter_tasks: vec![active_task()],
            ..Default::default()
        };
        assert_eq!(select_mode(&snap, true), ScreenMode::Fermentation);
        assert_eq!(select_mode(&snap, false), ScreenMode::Fermentation);
    }

    #[test]
    fn brewing_wins_over_fermentation() {
        let snap = BrewSnapshot {
            active_step: step(),
            fermenter_tasks: vec![active_task()],
            ..Default::default()
        };
        assert_eq!(select_mode(&snap, true), ScreenMode::MultiKettle);
    }
}
