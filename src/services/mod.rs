//! Collaborators of the sequencer
//!
//! The JSON file store that supplies timer records, and the audio notifier
//! that turns cues into tones.

pub mod audio;
pub mod store;
pub mod tone;

// Re-export main types
pub use audio::{AudioError, CueNotifier, SilentNotifier, ToneNotifier};
pub use store::{StoreError, TimerStore};
pub use tone::{Tone, Waveform};
