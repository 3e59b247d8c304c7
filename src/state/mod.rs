//! State management module
//!
//! Shared server state plus the per-timer run sessions it hands out.

pub mod app_state;
pub mod run_session;
pub mod run_view;
pub mod snapshot;

pub use app_state::AppState;
pub use run_session::RunSession;
pub use run_view::RunView;
pub use snapshot::{ClockDisplay, IntervalView, RunSnapshot};
