//! Human-readable formatting for readout values.

use telemetry_core::constants::SECONDS_PER_DAY;
use telemetry_estimators::{Estimate, Unit};

/// Placeholder shown for quantities that are not applicable.
pub const NOT_APPLICABLE: &str = "N/A";

/// `1d 02h 03m 04.5s`-style duration; leading fields are dropped while zero.
pub fn dhms(seconds: f64) -> String {
    if !seconds.is_finite() {
        return NOT_APPLICABLE.to_string();
    }
    let sign = if seconds < 0.0 { "-" } else { "" };
    // Round to the displayed precision first so no field shows 60.
    let total = (seconds.abs() * 10.0).round() / 10.0;
    let days = (total / SECONDS_PER_DAY).floor();
    let rest = total - days * SECONDS_PER_DAY;
    let hours = (rest / 3_600.0).floor();
    let minutes = ((rest - hours * 3_600.0) / 60.0).floor();
    let secs = rest - hours * 3_600.0 - minutes * 60.0;

    if days > 0.0 {
        format!("{sign}{days}d {hours:02}h {minutes:02}m {secs:04.1}s")
    } else if hours > 0.0 {
        format!("{sign}{hours}h {minutes:02}m {secs:04.1}s")
    } else if minutes > 0.0 {
        format!("{sign}{minutes}m {secs:04.1}s")
    } else {
        format!("{sign}{secs:.1}s")
    }
}

/// Magnitude with an SI prefix (k, M, G) and three significant decimals.
pub fn si(value: f64, unit: &str) -> String {
    const PREFIXES: [(f64, &str); 3] = [(1e9, "G"), (1e6, "M"), (1e3, "k")];
    let magnitude = value.abs();
    for (scale, prefix) in PREFIXES {
        if magnitude >= scale {
            return format!("{:.3} {prefix}{unit}", value / scale);
        }
    }
    if unit.is_empty() {
        format!("{value:.3}")
    } else {
        format!("{value:.3} {unit}")
    }
}

/// Format a value according to its semantic unit.
pub fn quantity(value: f64, unit: Unit) -> String {
    match unit {
        Unit::Seconds => dhms(value),
        Unit::Degrees => format!("{value:.3}°"),
        Unit::Atmospheres => format!("{value:.5} atm"),
        Unit::Tonnes => format!("{value:.2} t"),
        Unit::Kilonewtons => format!("{value:.0} kN"),
        Unit::Ratio => format!("{value:.2}"),
        other => si(value, other.symbol()),
    }
}

pub fn estimate(value: &Estimate<f64>, unit: Unit) -> String {
    match value {
        Ok(v) => quantity(*v, unit),
        Err(_) => NOT_APPLICABLE.to_string(),
    }
}
