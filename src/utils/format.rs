//! Clock formatting and identifier helpers

use uuid::Uuid;

/// Render a number of seconds as `m:ss` (minutes are not capped at 59)
pub fn format_mmss(total_seconds: u64) -> String {
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Parse a duration typed as `mm:ss` or a bare number of seconds.
///
/// The seconds part of `mm:ss` must be below 60. Fractional bare seconds are
/// floored. Returns `None` for anything else, including negative values.
pub fn parse_mmss(input: &str) -> Option<u64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some((minutes, seconds)) = trimmed.split_once(':') {
        let minutes: u64 = minutes.trim().parse().ok()?;
        let seconds: u64 = seconds.trim().parse().ok()?;
        if seconds > 59 {
            return None;
        }
        return minutes.checked_mul(60)?.checked_add(seconds);
    }

    let seconds: f64 = trimmed.parse().ok()?;
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    Some(seconds.floor() as u64)
}

/// Generate a fresh identifier such as `int_3f2a...`
pub fn new_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}
