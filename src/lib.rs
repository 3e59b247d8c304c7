//! Interval Timer - a local server that runs timed interval sequences
//!
//! This library provides the sequencing engine that steps through a timer's
//! intervals once per second with countdown and transition cues, plus the
//! store, audio and HTTP layers around it.

pub mod api;
pub mod config;
pub mod model;
pub mod sequencer;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use sequencer::{CueKind, RunState, Sequencer};
pub use state::AppState;
pub use utils::signals::shutdown_signal;
