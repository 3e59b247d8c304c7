//! Shared server state: the timer store, audio and open run views

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use tracing::info;

use super::{RunSession, RunView};
use crate::services::{CueNotifier, TimerStore};

/// State shared by every request handler
pub struct AppState {
    pub store: TimerStore,
    pub notifier: Arc<dyn CueNotifier>,
    /// At most one run view per timer
    pub runs: Mutex<HashMap<String, RunSession>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
}

impl AppState {
    pub fn new(store: TimerStore, notifier: Arc<dyn CueNotifier>, port: u16, host: String) -> Self {
        Self {
            store,
            notifier,
            runs: Mutex::new(HashMap::new()),
            start_time: Instant::now(),
            port,
            host,
        }
    }

    fn lock_runs(&self) -> Result<MutexGuard<'_, HashMap<String, RunSession>>, String> {
        self.runs
            .lock()
            .map_err(|e| format!("Failed to lock run views: {}", e))
    }

    /// Load a timer and enter a fresh run view, replacing any open one
    pub fn enter_run(&self, timer_id: &str) -> Result<RunView, String> {
        let Some(timer) = self.store.get(timer_id) else {
            return Ok(RunView::NotFound);
        };
        let Some(session) = RunSession::open(&timer, Arc::clone(&self.notifier)) else {
            info!("Timer {} has no intervals to run", timer_id);
            return Ok(RunView::Empty);
        };

        let previous = self.lock_runs()?.insert(timer_id.to_string(), session.clone());
        if let Some(previous) = previous {
            previous.close();
        }
        Ok(RunView::Ready(session))
    }

    /// The open run view for a timer, if any
    pub fn run_view(&self, timer_id: &str) -> Result<RunView, String> {
        if let Some(session) = self.lock_runs()?.get(timer_id) {
            return Ok(RunView::Ready(session.clone()));
        }
        Ok(match self.store.get(timer_id) {
            Some(_) => RunView::NotLoaded,
            None => RunView::NotFound,
        })
    }

    /// Leave a run view, stopping its clock. Returns whether one was open.
    pub fn exit_run(&self, timer_id: &str) -> Result<bool, String> {
        let removed = self.lock_runs()?.remove(timer_id);
        Ok(match removed {
            Some(session) => {
                session.close();
                true
            }
            None => false,
        })
    }

    /// Stop every clock, used on shutdown
    pub fn close_all_runs(&self) -> Result<(), String> {
        let sessions: Vec<RunSession> = self.lock_runs()?.drain().map(|(_, s)| s).collect();
        for session in &sessions {
            session.close();
        }
        info!("Closed {} run views", sessions.len());
        Ok(())
    }

    pub fn active_runs(&self) -> Result<usize, String> {
        Ok(self.lock_runs()?.len())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
