//! The interval sequencing engine

use tracing::debug;

use super::{CueKind, CueTracker, RunPhase, RunState};
use crate::model::{total_seconds, Interval, TimerSettings};

/// Result of one clock tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub state: RunState,
    pub cues: Vec<CueKind>,
}

/// Steps through an immutable interval list one second at a time.
///
/// All mutation goes through [`Sequencer::advance`] and the transport
/// commands; callers are responsible for serializing them.
#[derive(Debug, Clone)]
pub struct Sequencer {
    intervals: Vec<Interval>,
    settings: TimerSettings,
    state: RunState,
    cues: CueTracker,
    finished: bool,
    total: u64,
}

impl Sequencer {
    /// Seed a paused run at the first interval. `None` when there is nothing to run.
    pub fn start(intervals: Vec<Interval>, settings: TimerSettings) -> Option<Self> {
        let first = intervals.first()?.seconds;
        let state = RunState::initial(first);
        let total = total_seconds(&intervals);
        Some(Self {
            total,
            intervals,
            settings,
            cues: CueTracker::synced(&state),
            state,
            finished: false,
        })
    }

    pub fn snapshot(&self) -> RunState {
        self.state
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    pub fn current_interval(&self) -> &Interval {
        &self.intervals[self.state.current_index]
    }

    fn last_index(&self) -> usize {
        self.intervals.len() - 1
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn phase(&self) -> RunPhase {
        if self.state.running {
            RunPhase::Running
        } else if self.finished {
            RunPhase::Finished
        } else {
            RunPhase::Ready
        }
    }

    /// Advance the run by one elapsed second and report the cues it triggers.
    ///
    /// Ticking a finished run only clears `running`; the clock does not move.
    /// Elapsed time is capped at the composition's total, so seconds replayed
    /// after a skip back are not counted twice.
    pub fn advance(&mut self) -> TickReport {
        if self.finished {
            self.state.running = false;
            return TickReport {
                state: self.state,
                cues: Vec::new(),
            };
        }

        let next_elapsed = self.state.elapsed_total_seconds.saturating_add(1).min(self.total);

        if self.state.remaining_seconds <= 1 {
            if self.state.current_index == self.last_index() {
                self.state.running = false;
                self.state.remaining_seconds = 0;
                self.finished = true;
                debug!("Run finished after {}s", next_elapsed);
            } else {
                self.state.current_index += 1;
                self.state.remaining_seconds = self.intervals[self.state.current_index].seconds;
                debug!(
                    "Advanced to interval {} ({}s)",
                    self.state.current_index, self.state.remaining_seconds
                );
            }
        } else {
            self.state.remaining_seconds -= 1;
        }
        self.state.elapsed_total_seconds = next_elapsed;

        let cues = self.cues.evaluate(&self.state, &self.settings);
        TickReport {
            state: self.state,
            cues,
        }
    }

    /// Flip between paused and running
    pub fn toggle_pause(&mut self) -> RunState {
        self.state.running = !self.state.running;
        self.state
    }

    /// Back to the state right after [`Sequencer::start`]
    pub fn restart(&mut self) -> RunState {
        self.state = RunState::initial(self.intervals[0].seconds);
        self.cues.resync(&self.state);
        self.finished = false;
        self.state
    }

    /// Jump to the next interval at its full duration. Leaves `running` alone.
    pub fn skip_forward(&mut self) -> RunState {
        let target = (self.state.current_index + 1).min(self.last_index());
        self.jump_to(target)
    }

    /// Jump to the previous interval at its full duration. Leaves `running` alone.
    pub fn skip_back(&mut self) -> RunState {
        let target = self.state.current_index.saturating_sub(1);
        self.jump_to(target)
    }

    fn jump_to(&mut self, index: usize) -> RunState {
        if index == self.state.current_index {
            return self.state;
        }
        self.state.current_index = index;
        self.state.remaining_seconds = self.intervals[index].seconds;
        self.cues.resync(&self.state);
        self.finished = false;
        self.state
    }
}
