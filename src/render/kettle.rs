//! Kettle screens: fixed single-kettle view and the multi-kettle cycle.
//!
//! Layout per kettle:
//!
//! ```text
//! ┌────────────────────┐
//! │Mash In            ░│  step name, heater icon top right
//! │Mash Tun    01:29:55│  kettle name, remaining step time
//! │Targ. Temp: 66.50°C │
//! │Curr. Temp: 65.80°C │
//! └────────────────────┘
//! ```

use std::thread;
use std::time::Duration;

use crate::app::ports::{lock_display, DisplayPort, Host, SharedDisplay};
use crate::app::snapshot::{BrewSnapshot, Kettle, KettleId};
use crate::charmap::{transliterate, GLYPH_MUG};
use crate::error::DisplayError;
use crate::interval::hhmmss;
use crate::render::{current_temp_line, target_temp_line, RenderCtx};
use crate::screen::ScreenFrame;

/// Kettle name, or name plus remaining step time while the timer runs.
fn vessel_line(host: &dyn Host, ctx: &RenderCtx, snap: &BrewSnapshot, kettle: &Kettle) -> String {
    let name = transliterate(&kettle.name, ctx.charmap);
    let timer_end = snap.active_step.as_ref().and_then(|s| s.timer_end);
    match timer_end {
        Some(end) => {
            let remaining = (end - host.epoch_secs()).max(0) as u64;
            format!("{name:<11.11} {}", hhmmss(remaining))
        }
        None => name,
    }
}

/// Build the four-line frame for one kettle.
///
/// `hide_icon` suppresses the heater icon for the blink phase of the
/// single-kettle view; the cycling view shows it steadily.
fn kettle_frame(
    host: &dyn Host,
    ctx: &RenderCtx,
    snap: &BrewSnapshot,
    kettle: &Kettle,
    hide_icon: bool,
) -> ScreenFrame {
    let mut frame = ScreenFrame::new();
    if let Some(step) = &snap.active_step {
        frame.set_line(0, &transliterate(&step.name, ctx.charmap));
    }
    frame.set_line(1, &vessel_line(host, ctx, snap, kettle));
    frame.set_line(2, &target_temp_line(kettle.target_temp, ctx.unit));

    let current = kettle.sensor.and_then(|s| host.sensor_value(s));
    if current.is_none() {
        log::info!("kettle '{}': no sensor reading", kettle.name);
    }
    frame.set_line(3, &current_temp_line(current, ctx.unit));

    if snap.actor_on(kettle.heater) && !hide_icon {
        frame.set_primary_icon(GLYPH_MUG);
    }
    frame
}

/// Render the configured kettle once, synchronously.
///
/// `blink` alternates on every dispatcher tick; the heater icon is
/// visible on the off-phase only while the heater actor is on.
pub fn render_single(
    host: &dyn Host,
    ctx: &RenderCtx,
    display: &mut dyn DisplayPort,
    kettle_id: KettleId,
    blink: bool,
) -> Result<(), DisplayError> {
    let snap = host.snapshot();
    let frame = match snap.kettle(kettle_id) {
        Some(kettle) => kettle_frame(host, ctx, &snap, kettle, blink),
        None => {
            log::warn!("single display: no kettle with id {kettle_id}");
            let mut frame = ScreenFrame::new();
            if let Some(step) = &snap.active_step {
                frame.set_line(0, &transliterate(&step.name, ctx.charmap));
            }
            frame.set_line(1, &format!("no kettle {kettle_id}"));
            frame
        }
    };
    frame.present(display)
}

/// Cycle through every kettle once, dwelling `refresh_secs` on each.
///
/// Blocks the calling thread for `refresh × kettle count` seconds; the
/// dispatcher runs it on a guarded background thread. Each vessel gets
/// a fresh snapshot so a long cycle tracks live state.
pub fn cycle(
    host: &dyn Host,
    display: &SharedDisplay,
    ctx: &RenderCtx,
    refresh_secs: u64,
) -> Result<(), DisplayError> {
    let ids: Vec<KettleId> = host.snapshot().kettles.iter().map(|k| k.id).collect();
    for id in ids {
        let snap = host.snapshot();
        let Some(kettle) = snap.kettle(id) else {
            continue; // removed mid-cycle
        };
        let frame = kettle_frame(host, ctx, &snap, kettle, false);
        {
            let mut panel = lock_display(display);
            panel.clear()?;
            frame.present(panel.as_mut())?;
        }
        thread::sleep(Duration::from_secs(refresh_secs));
    }
    Ok(())
}
