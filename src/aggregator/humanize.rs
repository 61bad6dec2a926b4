//! Display formatting for byte sizes, durations and percentages.
//!
//! Output strings are part of the report contract; keep them stable.

use crate::utils::config::BYTE_UNITS;

/// Format a byte count with the largest fitting unit
///
/// Whole bytes print without decimals (`"512 bytes"`), larger units
/// with two (`"1.50 kB"`). Values past the last unit stay in TB.
pub fn humanize_bytes(size: u64) -> String {
    let last = BYTE_UNITS.len() - 1;
    let mut value = size as f64;
    let mut unit_index = 0;

    for (i, _) in BYTE_UNITS.iter().enumerate() {
        unit_index = i;
        if value < 1024.0 {
            break;
        }
        if i != last {
            value /= 1024.0;
        }
    }

    if unit_index == 0 {
        format!("{} {}", size, BYTE_UNITS[0])
    } else {
        format!("{:.2} {}", value, BYTE_UNITS[unit_index])
    }
}

/// Format a duration in seconds as µs, ms, s or m with three decimals
pub fn humanize_duration(seconds: f64) -> String {
    let (value, unit) = if seconds < 0.001 {
        (seconds * 1_000_000.0, "µs")
    } else if seconds < 1.0 {
        (seconds * 1000.0, "ms")
    } else if seconds < 60.0 {
        (seconds, "s")
    } else {
        (seconds / 60.0, "m")
    };

    format!("{:.3} {}", value, unit)
}

/// Round half away from zero to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `part` as a percentage of `whole`, rounded to two decimals
///
/// A zero part or zero whole gives 0.
pub fn percentage(part: f64, whole: f64) -> f64 {
    if part == 0.0 || whole == 0.0 {
        return 0.0;
    }
    round2(part / whole * 100.0)
}
