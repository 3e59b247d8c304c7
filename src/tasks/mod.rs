//! Background tasks module
//!
//! This module contains the clock task that ticks active runs.

pub mod run_clock;

pub use run_clock::{ClockHandle, ClockStep, TICK_PERIOD};
