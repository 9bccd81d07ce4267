//! Fermentation cycle: one screen per fermenter.
//!
//! Layout per fermenter:
//!
//! ```text
//! ┌────────────────────┐
//! │Altbier 23         ░│  brew name, heater/cooler icons top right
//! │Keller  D4 07:12:33 │  elapsed fermentation time
//! │Targ. Temp: 12.00°C │
//! │Curr. Temp: 12.40°C │
//! └────────────────────┘
//! ```

use std::thread;
use std::time::Duration;

use crate::app::ports::{lock_display, Host, SharedDisplay};
use crate::app::snapshot::{BrewSnapshot, Fermenter, FermenterId};
use crate::charmap::{transliterate, GLYPH_ICE, GLYPH_MUG};
use crate::error::DisplayError;
use crate::interval::format_interval;
use crate::render::{current_temp_line, target_temp_line, RenderCtx};
use crate::screen::ScreenFrame;

/// Fermenter name, or the elapsed-time line while a task timer runs.
fn vessel_line(
    host: &dyn Host,
    ctx: &RenderCtx,
    snap: &BrewSnapshot,
    fermenter: &Fermenter,
) -> String {
    let name = transliterate(&fermenter.name, ctx.charmap);
    match snap.task_for(fermenter.id).and_then(|t| t.timer_start) {
        Some(start) => {
            let elapsed = (host.epoch_secs() - start).max(0) as u64;
            format_interval(&name, elapsed)
        }
        None => name,
    }
}

fn fermenter_frame(
    host: &dyn Host,
    ctx: &RenderCtx,
    snap: &BrewSnapshot,
    fermenter: &Fermenter,
) -> ScreenFrame {
    let mut frame = ScreenFrame::new();
    frame.set_line(0, &transliterate(&fermenter.brew_name, ctx.charmap));
    frame.set_line(1, &vessel_line(host, ctx, snap, fermenter));
    frame.set_line(2, &target_temp_line(fermenter.target_temp, ctx.unit));

    let current = fermenter.sensor.and_then(|s| host.sensor_value(s));
    if current.is_none() {
        log::info!("fermenter '{}': no sensor reading", fermenter.name);
    }
    frame.set_line(3, &current_temp_line(current, ctx.unit));

    if snap.actor_on(fermenter.heater) {
        frame.set_primary_icon(GLYPH_MUG);
    }
    if snap.actor_on(fermenter.cooler) {
        frame.set_secondary_icon(GLYPH_ICE);
    }
    frame
}

/// Cycle through every fermenter once, dwelling `refresh_secs` on each.
///
/// Runs on a guarded background thread like the kettle cycle. Heater
/// and cooler icons are independent; both can show at once.
pub fn cycle(
    host: &dyn Host,
    display: &SharedDisplay,
    ctx: &RenderCtx,
    refresh_secs: u64,
) -> Result<(), DisplayError> {
    let ids: Vec<FermenterId> = host.snapshot().fermenters.iter().map(|f| f.id).collect();
    for id in ids {
        let snap = host.snapshot();
        let Some(fermenter) = snap.fermenters.iter().find(|f| f.id == id) else {
            continue; // removed mid-cycle
        };
        let frame = fermenter_frame(host, ctx, &snap, fermenter);
        {
            let mut panel = lock_display(display);
            panel.clear()?;
            frame.present(panel.as_mut())?;
        }
        thread::sleep(Duration::from_secs(refresh_secs));
    }
    Ok(())
}
