//! One active run of a timer: the sequencer, its clock and its subscribers

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};
use tokio::{sync::watch, task, time::timeout};
use tracing::{debug, info, warn};

use super::RunSnapshot;
use crate::{
    model::Timer,
    sequencer::Sequencer,
    services::CueNotifier,
    tasks::{run_clock, ClockHandle, ClockStep},
};

/// Upper bound on waiting for the audio output before resuming anyway
const UNLOCK_TIMEOUT: Duration = Duration::from_secs(2);

/// Handle to a run view. Clones share the same run.
#[derive(Clone)]
pub struct RunSession {
    shared: Arc<SessionShared>,
}

pub(crate) struct SessionShared {
    timer_id: String,
    timer_name: String,
    notifier: Arc<dyn CueNotifier>,
    inner: Mutex<SessionInner>,
    updates_tx: watch::Sender<RunSnapshot>,
}

/// Mutable run data; every tick and command holds this lock for its duration
struct SessionInner {
    sequencer: Sequencer,
    clock: Option<ClockHandle>,
    /// Bumped on every disarm so stale clock ticks are ignored
    generation: u64,
}

impl SessionInner {
    fn disarm(&mut self) {
        self.generation += 1;
        if let Some(clock) = self.clock.take() {
            debug!(
                "Superseding clock generation {} with {}",
                clock.generation(),
                self.generation
            );
            clock.disarm();
        }
    }

    fn arm(&mut self, shared: &Arc<SessionShared>) {
        self.disarm();
        self.clock = Some(run_clock::arm(Arc::clone(shared), self.generation));
    }
}

impl SessionShared {
    fn lock(&self) -> Result<MutexGuard<'_, SessionInner>, String> {
        self.inner
            .lock()
            .map_err(|e| format!("Failed to lock run of {}: {}", self.timer_id, e))
    }

    fn capture(&self, inner: &SessionInner) -> RunSnapshot {
        RunSnapshot::capture(&self.timer_id, &self.timer_name, &inner.sequencer)
    }

    fn publish(&self, snapshot: RunSnapshot) -> RunSnapshot {
        self.updates_tx.send_replace(snapshot.clone());
        snapshot
    }

    /// One clock tick for the clock armed as `generation`
    pub(crate) fn tick(&self, generation: u64) -> Result<ClockStep, String> {
        let mut inner = self.lock()?;
        if inner.generation != generation {
            debug!("Ignoring tick from stale clock generation {}", generation);
            return Ok(ClockStep::Stop);
        }
        if !inner.sequencer.snapshot().running {
            inner.disarm();
            return Ok(ClockStep::Stop);
        }

        let report = inner.sequencer.advance();
        for cue in &report.cues {
            self.notifier.emit(*cue);
        }
        debug!(
            "Tick {}: interval {} with {}s left, cues {:?}",
            report.state.elapsed_total_seconds,
            report.state.current_index,
            report.state.remaining_seconds,
            report.cues
        );

        let step = if report.state.running {
            ClockStep::Continue
        } else {
            info!("Run of {} finished after {}s", self.timer_id, report.state.elapsed_total_seconds);
            inner.disarm();
            ClockStep::Stop
        };

        let snapshot = self.capture(&inner);
        drop(inner);
        self.publish(snapshot);
        Ok(step)
    }
}

impl RunSession {
    /// Enter a run view for `timer`. `None` when it has no intervals.
    pub fn open(timer: &Timer, notifier: Arc<dyn CueNotifier>) -> Option<Self> {
        let sequencer = Sequencer::start(timer.intervals.clone(), timer.settings)?;
        let snapshot = RunSnapshot::capture(&timer.id, &timer.name, &sequencer);
        let (updates_tx, _) = watch::channel(snapshot);

        info!("Opened run of {} ({} intervals)", timer.id, timer.intervals.len());
        Some(Self {
            shared: Arc::new(SessionShared {
                timer_id: timer.id.clone(),
                timer_name: timer.name.clone(),
                notifier,
                inner: Mutex::new(SessionInner {
                    sequencer,
                    clock: None,
                    generation: 0,
                }),
                updates_tx,
            }),
        })
    }

    pub fn timer_id(&self) -> &str {
        &self.shared.timer_id
    }

    /// Current snapshot without touching the run
    pub fn snapshot(&self) -> Result<RunSnapshot, String> {
        let inner = self.shared.lock()?;
        Ok(self.shared.capture(&inner))
    }

    /// Receive a snapshot after every tick and command
    pub fn subscribe(&self) -> watch::Receiver<RunSnapshot> {
        self.shared.updates_tx.subscribe()
    }

    pub fn is_ticking(&self) -> Result<bool, String> {
        Ok(self.shared.lock()?.clock.is_some())
    }

    /// Start or pause. Resuming with sound on unlocks audio first; a failed
    /// unlock leaves the run silent but still starts it.
    pub async fn toggle_pause(&self) -> Result<RunSnapshot, String> {
        let (resuming, sound_enabled) = {
            let inner = self.shared.lock()?;
            (
                !inner.sequencer.snapshot().running,
                inner.sequencer.settings().sound_enabled,
            )
        };
        if resuming && sound_enabled {
            self.unlock_audio().await;
        }

        let mut inner = self.shared.lock()?;
        let state = inner.sequencer.toggle_pause();
        if state.running {
            inner.arm(&self.shared);
            info!("Run of {} started", self.shared.timer_id);
        } else {
            inner.disarm();
            info!("Run of {} paused", self.shared.timer_id);
        }
        let snapshot = self.shared.capture(&inner);
        drop(inner);
        Ok(self.shared.publish(snapshot))
    }

    async fn unlock_audio(&self) {
        let notifier = Arc::clone(&self.shared.notifier);
        match timeout(UNLOCK_TIMEOUT, task::spawn_blocking(move || notifier.unlock())).await {
            Ok(Ok(Ok(()))) => debug!("Audio unlocked"),
            Ok(Ok(Err(e))) => warn!("Continuing without sound: {}", e),
            Ok(Err(e)) => warn!("Audio unlock task failed, continuing without sound: {}", e),
            Err(_) => warn!("Audio unlock timed out, continuing without sound"),
        }
    }

    pub fn restart(&self) -> Result<RunSnapshot, String> {
        self.command("restart", Sequencer::restart)
    }

    pub fn skip_forward(&self) -> Result<RunSnapshot, String> {
        self.command("skip forward", Sequencer::skip_forward)
    }

    pub fn skip_back(&self) -> Result<RunSnapshot, String> {
        self.command("skip back", Sequencer::skip_back)
    }

    fn command<F, R>(&self, name: &str, apply: F) -> Result<RunSnapshot, String>
    where
        F: FnOnce(&mut Sequencer) -> R,
    {
        let mut inner = self.shared.lock()?;
        apply(&mut inner.sequencer);
        // Restart pauses the run; skips leave the clock as it was
        if !inner.sequencer.snapshot().running {
            inner.disarm();
        }
        let snapshot = self.shared.capture(&inner);
        drop(inner);
        info!("Run of {}: {}", self.shared.timer_id, name);
        Ok(self.shared.publish(snapshot))
    }

    /// Stop ticking before the run view is discarded. Idempotent.
    pub fn close(&self) {
        match self.shared.lock() {
            Ok(mut inner) => inner.disarm(),
            Err(e) => warn!("{}", e),
        }
        info!("Closed run of {}", self.shared.timer_id);
    }
}
