//! Formatting helpers for presenting report values.

/// Render a numeric cell, trimming the trailing `.0` off integral values so
/// counts read like counts.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{}%", format_value(value))
}
