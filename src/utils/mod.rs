//! Utility functions module
//!
//! Signal handling plus the small formatting helpers shared by the API and
//! the model.

pub mod format;
pub mod signals;

pub use format::{format_mmss, new_id, parse_mmss};
pub use signals::shutdown_signal;
