//! Elapsed/remaining time formatting for 20-column lines.
//!
//! Fermentation runs span minutes to months, so the formatter picks one
//! of three layouts by magnitude and squeezes the label into whatever
//! width is left. Step timers use the plain day-wrapped `HH:MM:SS`.

const WEEK: u64 = 604_800;
const DAY: u64 = 86_400;
const HOUR: u64 = 3_600;
const MINUTE: u64 = 60;

/// Maximum rendered width, matching the display column count.
const MAX_WIDTH: usize = 20;

/// Split a second count into calendar components, largest unit first.
///
/// Returns `(weeks, days, hours, minutes, seconds)` with each remainder
/// carried into the next smaller unit, so
/// `total == w*604800 + d*86400 + h*3600 + m*60 + s`.
pub fn decompose(total_secs: u64) -> (u64, u64, u64, u64, u64) {
    let weeks = total_secs / WEEK;
    let rem = total_secs % WEEK;
    let days = rem / DAY;
    let rem = rem % DAY;
    let hours = rem / HOUR;
    let rem = rem % HOUR;
    let minutes = rem / MINUTE;
    let seconds = rem % MINUTE;
    (weeks, days, hours, minutes, seconds)
}

/// Format a labelled duration into at most 20 characters.
///
/// Three layouts by magnitude:
/// - a week or more: `label.. W1 D2 03:04` (seconds dropped)
/// - a day or more: `label.. D2 03:04:05`
/// - under a day: `label..... 03:04:05`
///
/// The label is left-justified and truncated to the remaining width.
/// Callers clamp negative durations to zero before calling.
pub fn format_interval(label: &str, total_secs: u64) -> String {
    let (weeks, days, hours, minutes, seconds) = decompose(total_secs);

    let line = if weeks >= 1 {
        format!("{label:<7.7} W{weeks} D{days} {hours:02}:{minutes:02}")
    } else if days >= 1 {
        format!("{label:<7.7} D{days} {hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{label:<10.10} {hours:02}:{minutes:02}:{seconds:02}")
    };

    line.chars().take(MAX_WIDTH).collect()
}

/// Day-wrapped `HH:MM:SS` for step timers (same wrap as `gmtime`).
pub fn hhmmss(total_secs: u64) -> String {
    let (_, _, hours, minutes, seconds) = decompose(total_secs);
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn under_a_day_uses_wide_label() {
        assert_eq!(format_interval("Lager", 3661), "Lager      01:01:01");
    }

    #[test]
    fn day_layout_matches_reference() {
        // 1 day, 1 hour, 1 minute, 1 second
        assert_eq!(format_interval("Ale", 90_061), "Ale     D1 01:01:01");
    }

    #[test]
    fn week_layout_drops_seconds() {
        // 2 weeks, 3 days, 4 hours, 5 minutes, 59 seconds
        let secs = 2 * WEEK + 3 * DAY + 4 * HOUR + 5 * MINUTE + 59;
        assert_eq!(format_interval("Pils", secs), "Pils    W2 D3 04:05");
    }

    #[test]
    fn long_labels_are_truncated_not_overflowed() {
        let line = format_interval("Weizenbock Doppel", 42);
        assert_eq!(line, "Weizenbock 00:00:42");
        assert!(line.chars().count() <= 20);
    }

    #[test]
    fn zero_duration() {
        assert_eq!(format_interval("Kolsch", 0), "Kolsch     00:00:00");
    }

    #[test]
    fn decompose_reassembles() {
        for total in [0, 59, 60, 3_599, 86_399, 604_799, 1_000_000, u32::MAX as u64] {
            let (w, d, h, m, s) = decompose(total);
            assert_eq!(total, w * WEEK + d * DAY + h * HOUR + m * MINUTE + s);
            assert!(d < 7 && h < 24 && m < 60 && s < 60);
        }
    }

    #[test]
    fn hhmmss_wraps_at_a_day() {
        assert_eq!(hhmmss(3_661), "01:01:01");
        assert_eq!(hhmmss(86_400 + 61), "00:01:01");
    }
}
