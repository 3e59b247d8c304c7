//! Stored timer records and the drafts clients submit to create them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{interval::new_interval_id, Interval, IntervalColor, TimerSettings, MAX_INTERVAL_SECONDS};
use crate::utils::{new_id, parse_mmss};

const UNTITLED: &str = "Untitled timer";

/// A named interval composition as kept in the timer store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timer {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub settings: TimerSettings,
    #[serde(default)]
    pub intervals: Vec<Interval>,
}

impl Timer {
    /// Build a new record from a draft, stamping both timestamps with `now`
    pub fn from_draft(draft: TimerDraft, now: DateTime<Utc>) -> Result<Self, DraftError> {
        let (name, settings, intervals) = draft.validate()?;
        Ok(Self {
            id: new_id("timer"),
            name,
            created_at: now,
            updated_at: now,
            settings,
            intervals,
        })
    }

    /// Replace the editable parts of the record, keeping id and creation time
    pub fn apply_draft(&mut self, draft: TimerDraft, now: DateTime<Utc>) -> Result<(), DraftError> {
        let (name, settings, intervals) = draft.validate()?;
        self.name = name;
        self.settings = settings;
        self.intervals = intervals;
        self.updated_at = now;
        Ok(())
    }

    pub fn total_seconds(&self) -> u64 {
        super::total_seconds(&self.intervals)
    }

    /// Give every interval without an id a fresh one. Returns whether any changed.
    pub fn backfill_interval_ids(&mut self) -> bool {
        let mut changed = false;
        for interval in self.intervals.iter_mut().filter(|interval| interval.id.is_empty()) {
            interval.id = new_interval_id();
            changed = true;
        }
        changed
    }
}

/// Rejected draft contents
#[derive(Debug, Error, PartialEq)]
pub enum DraftError {
    #[error("interval {index} has an invalid duration: {value}")]
    InvalidDuration { index: usize, value: String },

    #[error("interval {index} is longer than {max}s: {seconds}s")]
    DurationTooLong { index: usize, seconds: u64, max: u64 },
}

/// Timer contents as submitted by the editor
#[derive(Debug, Clone, Deserialize)]
pub struct TimerDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub settings: TimerSettings,
    #[serde(default)]
    pub intervals: Vec<IntervalDraft>,
}

impl TimerDraft {
    fn validate(self) -> Result<(String, TimerSettings, Vec<Interval>), DraftError> {
        let name = match self.name.trim() {
            "" => UNTITLED.to_string(),
            trimmed => trimmed.to_string(),
        };
        let intervals = self
            .intervals
            .into_iter()
            .enumerate()
            .map(|(index, draft)| draft.into_interval(index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((name, self.settings, intervals))
    }
}

/// One interval row from the editor
#[derive(Debug, Clone, Deserialize)]
pub struct IntervalDraft {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    pub seconds: DurationInput,
    #[serde(default)]
    pub color: IntervalColor,
}

/// A duration typed either as a number of seconds or as `mm:ss` text
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationInput {
    Seconds(f64),
    Text(String),
}

impl DurationInput {
    pub fn to_seconds(&self) -> Option<u64> {
        match self {
            DurationInput::Seconds(s) if s.is_finite() && *s >= 0.0 => Some(s.floor() as u64),
            DurationInput::Seconds(_) => None,
            DurationInput::Text(text) => parse_mmss(text),
        }
    }

    fn describe(&self) -> String {
        match self {
            DurationInput::Seconds(s) => s.to_string(),
            DurationInput::Text(text) => format!("{:?}", text),
        }
    }
}

impl IntervalDraft {
    fn into_interval(self, index: usize) -> Result<Interval, DraftError> {
        let seconds = self.seconds.to_seconds().ok_or_else(|| DraftError::InvalidDuration {
            index,
            value: self.seconds.describe(),
        })?;
        if seconds > MAX_INTERVAL_SECONDS {
            return Err(DraftError::DurationTooLong {
                index,
                seconds,
                max: MAX_INTERVAL_SECONDS,
            });
        }
        Ok(Interval {
            id: self.id.filter(|id| !id.is_empty()).unwrap_or_else(new_interval_id),
            title: self.title.trim().to_string(),
            seconds,
            color: self.color,
        })
    }
}
