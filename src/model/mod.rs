//! Timer data model
//!
//! Intervals, per-timer settings, the color palette and the stored timer
//! record. The sequencer only reads these; editing happens between runs.

pub mod interval;
pub mod palette;
pub mod settings;
pub mod timer;

pub use interval::{total_seconds, Interval, MAX_INTERVAL_SECONDS};
pub use palette::{palette, IntervalColor, Swatch};
pub use settings::{CountdownSetting, TimerSettings};
pub use timer::{DraftError, DurationInput, IntervalDraft, Timer, TimerDraft};
