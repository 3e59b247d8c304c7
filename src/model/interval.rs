//! A single timed segment of a timer

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::IntervalColor;
use crate::utils::new_id;

/// One named, timed, colored segment of a timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    /// Empty when a stored record predates interval ids; the store backfills it.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub seconds: u64,
    #[serde(default)]
    pub color: IntervalColor,
}

impl Interval {
    pub fn new(title: impl Into<String>, seconds: u64, color: IntervalColor) -> Self {
        Self {
            id: new_interval_id(),
            title: title.into(),
            seconds,
            color,
        }
    }
}

/// Longest duration a single interval may have (one day)
pub const MAX_INTERVAL_SECONDS: u64 = 24 * 60 * 60;

pub(crate) fn new_interval_id() -> String {
    new_id("int")
}

/// Sum of all interval durations
pub fn total_seconds(intervals: &[Interval]) -> u64 {
    intervals
        .iter()
        .fold(0u64, |total, interval| total.saturating_add(interval.seconds))
}

/// Coerce a stored duration into whole non-negative seconds.
///
/// Negative, non-finite or non-numeric values become 0; fractions are floored
/// and anything longer than [`MAX_INTERVAL_SECONDS`] is clamped to it.
fn lenient_seconds<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let seconds = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(match seconds {
        Some(s) if s.is_finite() && s > 0.0 => (s.floor() as u64).min(MAX_INTERVAL_SECONDS),
        _ => 0,
    })
}
