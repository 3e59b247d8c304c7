//! Audio cue detection
//!
//! The tracker remembers the index and remaining seconds seen at the previous
//! evaluation and compares each tick's new values against them.

use serde::{Deserialize, Serialize};

use super::RunState;
use crate::model::TimerSettings;

/// Kind of audio notification requested by the sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CueKind {
    Countdown,
    Transition,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CueTracker {
    last_remaining: Option<u64>,
    last_index: Option<usize>,
}

impl CueTracker {
    /// A tracker that already considers `state` as observed
    pub fn synced(state: &RunState) -> Self {
        let mut tracker = Self::default();
        tracker.resync(state);
        tracker
    }

    /// Forget the previous observation in favour of `state`, without cueing
    pub fn resync(&mut self, state: &RunState) {
        self.last_remaining = Some(state.remaining_seconds);
        self.last_index = Some(state.current_index);
    }

    /// Cues due for `state`. Nothing is remembered while paused or muted.
    pub fn evaluate(&mut self, state: &RunState, settings: &TimerSettings) -> Vec<CueKind> {
        let mut cues = Vec::new();
        if !state.running || !settings.sound_enabled {
            return cues;
        }

        if self.last_remaining != Some(state.remaining_seconds)
            && settings.countdown_beep.contains(state.remaining_seconds)
        {
            cues.push(CueKind::Countdown);
        }

        if matches!(self.last_index, Some(index) if index != state.current_index) {
            cues.push(CueKind::Transition);
        }

        // Both checks above must see the previous observation
        self.resync(state);
        cues
    }
}
