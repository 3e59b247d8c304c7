//! Run-time sequencing engine
//!
//! Holds the run state for one pass through a timer's intervals, advances it
//! once per second and decides which audio cues each tick triggers. Nothing
//! here touches the clock or the audio device directly.

pub mod cues;
pub mod engine;
pub mod run_state;

pub use cues::{CueKind, CueTracker};
pub use engine::{Sequencer, TickReport};
pub use run_state::{RunPhase, RunState};
