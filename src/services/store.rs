//! JSON file store for timer records

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};
use directories::ProjectDirs;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::model::Timer;

const STORE_FILE: &str = "timers.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to lock timer store: {0}")]
    Lock(String),
}

/// All timers kept as one JSON array in a single file.
///
/// A missing or unreadable file reads as an empty list. Writes go through a
/// lock so concurrent requests cannot interleave read-modify-write cycles.
#[derive(Debug)]
pub struct TimerStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl TimerStore {
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Default location under the user's data directory
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("", "", "interval-timer")
            .map(|dirs| dirs.data_dir().join(STORE_FILE))
            .unwrap_or_else(|| PathBuf::from(STORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record, backfilling missing interval ids.
    ///
    /// The flag reports whether any id was backfilled and the file needs rewriting.
    fn read_all(&self) -> (Vec<Timer>, bool) {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return (Vec::new(), false),
            Err(e) => {
                warn!("Failed to read timer store {}: {}", self.path.display(), e);
                return (Vec::new(), false);
            }
        };

        let mut timers = match serde_json::from_slice::<Vec<Timer>>(&bytes) {
            Ok(timers) => timers,
            Err(e) => {
                warn!("Ignoring unreadable timer store {}: {}", self.path.display(), e);
                return (Vec::new(), false);
            }
        };

        let mut backfilled = false;
        for timer in &mut timers {
            backfilled |= timer.backfill_interval_ids();
        }
        (timers, backfilled)
    }

    /// Read for a query, persisting backfilled ids so they stay stable
    fn load(&self) -> Vec<Timer> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let (timers, backfilled) = self.read_all();
        if backfilled {
            match self.write_all(&timers) {
                Ok(()) => info!("Backfilled interval ids in {}", self.path.display()),
                Err(e) => warn!("Failed to persist backfilled interval ids: {}", e),
            }
        }
        timers
    }

    fn write_all(&self, timers: &[Timer]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_vec_pretty(timers)?;
        fs::write(&self.path, data)?;
        debug!("Wrote {} timers to {}", timers.len(), self.path.display());
        Ok(())
    }

    pub fn list(&self) -> Vec<Timer> {
        self.load()
    }

    pub fn get(&self, id: &str) -> Option<Timer> {
        self.load().into_iter().find(|timer| timer.id == id)
    }

    /// Insert or replace by id; new timers are appended
    pub fn save(&self, timer: &Timer) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().map_err(|e| StoreError::Lock(e.to_string()))?;
        let (mut timers, _) = self.read_all();
        match timers.iter_mut().find(|existing| existing.id == timer.id) {
            Some(existing) => *existing = timer.clone(),
            None => timers.push(timer.clone()),
        }
        self.write_all(&timers)?;
        info!("Saved timer {} ({})", timer.id, timer.name);
        Ok(())
    }

    /// Remove a timer. Returns whether it existed.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().map_err(|e| StoreError::Lock(e.to_string()))?;
        let (mut timers, _) = self.read_all();
        let before = timers.len();
        timers.retain(|timer| timer.id != id);
        if timers.len() == before {
            return Ok(false);
        }
        self.write_all(&timers)?;
        info!("Deleted timer {}", id);
        Ok(true)
    }
}
