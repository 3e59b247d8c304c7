//! Run state owned by the sequencer

use serde::{Deserialize, Serialize};

/// Position and clock of one run through a timer's intervals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunState {
    pub running: bool,
    pub current_index: usize,
    /// Whole seconds left in the interval at `current_index`
    pub remaining_seconds: u64,
    pub elapsed_total_seconds: u64,
}

impl RunState {
    /// Paused at the start of the first interval
    pub fn initial(first_interval_seconds: u64) -> Self {
        Self {
            running: false,
            current_index: 0,
            remaining_seconds: first_interval_seconds,
            elapsed_total_seconds: 0,
        }
    }
}

/// Coarse phase of a run, for presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunPhase {
    Ready,
    Running,
    Finished,
}
