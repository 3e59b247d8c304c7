//! What a timer's run screen can currently show

use super::RunSession;

/// Outcome of looking up or entering a run view
#[derive(Clone)]
pub enum RunView {
    /// The timer exists but no run view has been entered
    NotLoaded,
    /// No timer with that id
    NotFound,
    /// The timer has no intervals, so there is nothing to run
    Empty,
    Ready(RunSession),
}

impl RunView {
    pub fn session(&self) -> Option<&RunSession> {
        match self {
            RunView::Ready(session) => Some(session),
            _ => None,
        }
    }
}

impl std::fmt::Debug for RunView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunView::NotLoaded => write!(f, "NotLoaded"),
            RunView::NotFound => write!(f, "NotFound"),
            RunView::Empty => write!(f, "Empty"),
            RunView::Ready(session) => write!(f, "Ready({})", session.timer_id()),
        }
    }
}
