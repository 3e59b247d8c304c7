//! The 1 Hz clock that drives a running sequencer

use std::{sync::Arc, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::{debug, error};

use crate::state::run_session::SessionShared;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// What the clock should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockStep {
    Continue,
    Stop,
}

/// The only handle to an armed clock. Dropping it disarms the clock.
#[derive(Debug)]
pub struct ClockHandle {
    generation: u64,
    task: JoinHandle<()>,
}

impl ClockHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Stop the clock. A tick already waiting on the session lock is
    /// rejected by its stale generation.
    pub fn disarm(self) {
        drop(self);
    }
}

impl Drop for ClockHandle {
    fn drop(&mut self) {
        self.task.abort();
        debug!("Disarmed run clock generation {}", self.generation);
    }
}

/// Spawn a clock whose first tick lands one period from now
pub(crate) fn arm(session: Arc<SessionShared>, generation: u64) -> ClockHandle {
    debug!("Arming run clock generation {}", generation);
    let task = tokio::spawn(run_clock_task(session, generation));
    ClockHandle { generation, task }
}

async fn run_clock_task(session: Arc<SessionShared>, generation: u64) {
    let mut ticks = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);

    loop {
        ticks.tick().await;
        match session.tick(generation) {
            Ok(ClockStep::Continue) => {}
            Ok(ClockStep::Stop) => break,
            Err(e) => {
                error!("Run clock stopped: {}", e);
                break;
            }
        }
    }

    debug!("Run clock generation {} exited", generation);
}
