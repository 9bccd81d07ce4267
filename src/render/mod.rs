//! Screen renderers for the four panel views.
//!
//! Each renderer pulls a snapshot through the host ports, lays out a
//! [`ScreenFrame`](crate::screen::ScreenFrame) and presents it. Lookup
//! misses degrade in place ("No Data", icon off) so a render never
//! fails on host state, only on the display bus.

pub mod fermenter;
pub mod kettle;
pub mod standby;

use crate::config::TempUnit;

/// Per-session rendering context, fixed at initialization.
#[derive(Debug, Clone, Copy)]
pub struct RenderCtx {
    pub charmap: crate::charmap::Charmap,
    pub unit: TempUnit,
}

/// `Targ. Temp: 66.50°C` style line for row 2.
pub(crate) fn target_temp_line(value: f64, unit: TempUnit) -> String {
    format!("Targ. Temp:{value:6.2}\u{b0}{}", unit.symbol())
}

/// `Curr. Temp: 65.20°C` style line for row 3, with the "No Data"
/// placeholder when the sensor has nothing to say.
pub(crate) fn current_temp_line(value: Option<f64>, unit: TempUnit) -> String {
    match value {
        Some(v) => format!("Curr. Temp:{v:6.2}\u{b0}{}", unit.symbol()),
        None => "Curr. Temp: No Data".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_lines_fit_the_panel() {
        let t = target_temp_line(66.5, TempUnit::Celsius);
        assert_eq!(t, "Targ. Temp: 66.50°C");
        assert!(t.chars().count() <= 20);

        let c = current_temp_line(Some(102.25), TempUnit::Fahrenheit);
        assert_eq!(c, "Curr. Temp:102.25°F");
    }

    #[test]
    fn missing_reading_renders_no_data() {
        assert_eq!(
            current_temp_line(None, TempUnit::Celsius),
            "Curr. Temp: No Data"
        );
    }
}
