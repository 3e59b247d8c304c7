//! Read-only view of a run for the presentation layer

use serde::Serialize;

use crate::{
    model::{total_seconds, Interval, Swatch},
    sequencer::{RunPhase, RunState, Sequencer},
    utils::format_mmss,
};

/// An interval as shown on the run screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalView {
    pub index: usize,
    pub id: String,
    pub title: String,
    pub seconds: u64,
    pub color: Swatch,
}

impl IntervalView {
    fn new(index: usize, interval: &Interval) -> Self {
        Self {
            index,
            id: interval.id.clone(),
            title: interval.title.clone(),
            seconds: interval.seconds,
            color: interval.color.swatch(),
        }
    }
}

/// Clock values rendered as `m:ss`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockDisplay {
    pub remaining: String,
    pub elapsed: String,
    pub remaining_total: String,
}

/// Everything the run screen needs after a tick or command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSnapshot {
    pub timer_id: String,
    pub timer_name: String,
    pub phase: RunPhase,
    pub state: RunState,
    pub interval_count: usize,
    /// 1-based position, e.g. `2 / 5`
    pub position: String,
    pub total_seconds: u64,
    pub remaining_total_seconds: u64,
    pub display: ClockDisplay,
    pub previous: Option<IntervalView>,
    pub current: IntervalView,
    pub next: Option<IntervalView>,
}

impl RunSnapshot {
    pub fn capture(timer_id: &str, timer_name: &str, sequencer: &Sequencer) -> Self {
        let state = sequencer.snapshot();
        let intervals = sequencer.intervals();
        let index = state.current_index;
        let total = total_seconds(intervals);
        let remaining_total = total.saturating_sub(state.elapsed_total_seconds);

        let view = |i: usize| intervals.get(i).map(|interval| IntervalView::new(i, interval));

        Self {
            timer_id: timer_id.to_string(),
            timer_name: timer_name.to_string(),
            phase: sequencer.phase(),
            state,
            interval_count: intervals.len(),
            position: format!("{} / {}", index + 1, intervals.len()),
            total_seconds: total,
            remaining_total_seconds: remaining_total,
            display: ClockDisplay {
                remaining: format_mmss(state.remaining_seconds),
                elapsed: format_mmss(state.elapsed_total_seconds),
                remaining_total: format_mmss(remaining_total),
            },
            previous: index.checked_sub(1).and_then(view),
            current: IntervalView::new(index, sequencer.current_interval()),
            next: view(index + 1),
        }
    }
}
