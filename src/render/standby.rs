//! Standby screen: host identity, brewery name, IP, clock.
//!
//! Shown whenever nothing is brewing or fermenting, so the panel doubles
//! as a "where is my controller" display after boot.

use crate::adapters::net;
use crate::app::ports::{DisplayPort, Host};
use crate::charmap::transliterate;
use crate::error::DisplayError;
use crate::render::RenderCtx;
use crate::screen::ScreenFrame;

pub fn render(
    host: &dyn Host,
    ctx: &RenderCtx,
    display: &mut dyn DisplayPort,
) -> Result<(), DisplayError> {
    let brewery = host
        .get_parameter("brewery_name")
        .and_then(|v| v.as_str().map(str::to_owned))
        .unwrap_or_else(|| "No Brewery".to_owned());

    let mut frame = ScreenFrame::new();
    frame.set_line(0, &format!("{} {}", host.app_name(), host.app_version()));
    frame.set_line(1, &transliterate(&brewery, ctx.charmap));
    frame.set_line(2, &format!("IP: {}", net::local_ip()));
    frame.set_line(3, &host.local_now().format("%Y-%m-%d %H:%M:%S").to_string());
    frame.present(display)
}
