//! Audio cue notification
//!
//! The sequencer hands cues to a [`CueNotifier`] and never waits for them.
//! [`ToneNotifier`] plays them through one process-wide output that is opened
//! lazily by the first [`CueNotifier::unlock`] call.

use std::{
    sync::{
        mpsc::{self, SyncSender, TrySendError},
        OnceLock,
    },
    thread,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::tone::Tone;
use crate::sequencer::CueKind;

/// Pending tones beyond this are dropped rather than queued
const TONE_QUEUE_DEPTH: usize = 8;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AudioError {
    #[error("Audio output unavailable: {0}")]
    Unavailable(String),

    #[error("Tone playback failed: {0}")]
    Playback(String),
}

/// Receiver of cue requests from a running sequencer
pub trait CueNotifier: Send + Sync + 'static {
    /// Make the output ready. Idempotent; may block while the device opens.
    fn unlock(&self) -> Result<(), AudioError>;

    /// Request a tone. Must return immediately.
    fn emit(&self, cue: CueKind);
}

/// Notifier that drops every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl CueNotifier for SilentNotifier {
    fn unlock(&self) -> Result<(), AudioError> {
        Ok(())
    }

    fn emit(&self, cue: CueKind) {
        debug!("Muted {:?} cue", cue);
    }
}

/// Sink that actually produces sound for a tone
trait ToneOutput {
    fn play(&mut self, tone: &Tone) -> Result<(), AudioError>;
}

/// Once opened (or failed to open) the output stays that way for the process
static OUTPUT: OnceLock<Result<SyncSender<Tone>, AudioError>> = OnceLock::new();

/// Plays cues on the shared audio output
#[derive(Debug, Default, Clone, Copy)]
pub struct ToneNotifier;

impl ToneNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl CueNotifier for ToneNotifier {
    fn unlock(&self) -> Result<(), AudioError> {
        match OUTPUT.get_or_init(spawn_playback_thread) {
            Ok(_) => Ok(()),
            Err(e) => Err(e.clone()),
        }
    }

    fn emit(&self, cue: CueKind) {
        let Some(Ok(tx)) = OUTPUT.get() else {
            debug!("Audio not unlocked, skipping {:?} cue", cue);
            return;
        };
        match tx.try_send(Tone::for_cue(cue)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => debug!("Tone queue full, dropping {:?} cue", cue),
            Err(TrySendError::Disconnected(_)) => warn!("Audio thread has stopped, dropping {:?} cue", cue),
        }
    }
}

/// Start the thread that owns the output and wait until it reports readiness
fn spawn_playback_thread() -> Result<SyncSender<Tone>, AudioError> {
    let (tone_tx, tone_rx) = mpsc::sync_channel::<Tone>(TONE_QUEUE_DEPTH);
    let (ready_tx, ready_rx) = mpsc::channel::<Result<(), AudioError>>();

    thread::Builder::new()
        .name("cue-playback".to_string())
        .spawn(move || {
            let mut output = match open_output() {
                Ok(output) => {
                    let _ = ready_tx.send(Ok(()));
                    output
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };

            while let Ok(tone) = tone_rx.recv() {
                if let Err(e) = output.play(&tone) {
                    warn!("{}", e);
                }
            }
        })
        .map_err(|e| AudioError::Unavailable(format!("failed to spawn playback thread: {}", e)))?;

    match ready_rx.recv() {
        Ok(Ok(())) => {
            info!("Audio output ready");
            Ok(tone_tx)
        }
        Ok(Err(e)) => {
            warn!("{}; cues will be silent", e);
            Err(e)
        }
        Err(_) => Err(AudioError::Unavailable("playback thread exited during startup".to_string())),
    }
}

#[cfg(not(feature = "playback"))]
fn open_output() -> Result<Box<dyn ToneOutput>, AudioError> {
    Ok(Box::new(bell::BellOutput))
}

#[cfg(feature = "playback")]
fn open_output() -> Result<Box<dyn ToneOutput>, AudioError> {
    Ok(Box::new(device::DeviceOutput::open()?))
}

#[cfg(not(feature = "playback"))]
mod bell {
    use std::io::Write;

    use super::{AudioError, Tone, ToneOutput};

    /// Rings the terminal bell; used when built without device playback
    pub(super) struct BellOutput;

    impl ToneOutput for BellOutput {
        fn play(&mut self, _tone: &Tone) -> Result<(), AudioError> {
            let mut stderr = std::io::stderr();
            stderr
                .write_all(b"\x07")
                .and_then(|_| stderr.flush())
                .map_err(|e| AudioError::Playback(e.to_string()))
        }
    }
}

#[cfg(feature = "playback")]
mod device {
    use std::{
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
        thread,
        time::Duration,
    };

    use cpal::{
        traits::{DeviceTrait, HostTrait, StreamTrait},
        Device, SampleFormat, StreamConfig,
    };
    use tracing::{info, warn};

    use super::{AudioError, Tone, ToneOutput};

    /// Extra time after a tone before its stream is dropped
    const TAIL: Duration = Duration::from_millis(20);

    /// Default output device, one short stream per tone
    pub(super) struct DeviceOutput {
        device: Device,
        config: StreamConfig,
    }

    impl DeviceOutput {
        pub(super) fn open() -> Result<Self, AudioError> {
            let host = cpal::default_host();
            let device = host
                .default_output_device()
                .ok_or_else(|| AudioError::Unavailable("no output device found".to_string()))?;

            let supported = device
                .default_output_config()
                .map_err(|e| AudioError::Unavailable(e.to_string()))?;
            if supported.sample_format() != SampleFormat::F32 {
                return Err(AudioError::Unavailable(format!(
                    "unsupported sample format {:?}",
                    supported.sample_format()
                )));
            }

            info!(
                "Audio device: {}",
                device.name().unwrap_or_else(|_| "unknown".to_string())
            );
            Ok(Self {
                device,
                config: supported.into(),
            })
        }
    }

    impl ToneOutput for DeviceOutput {
        fn play(&mut self, tone: &Tone) -> Result<(), AudioError> {
            let channels = self.config.channels as usize;
            let samples = Arc::new(tone.render(self.config.sample_rate.0));
            let position = Arc::new(AtomicUsize::new(0));

            let data = Arc::clone(&samples);
            let cursor = Arc::clone(&position);
            let stream = self
                .device
                .build_output_stream(
                    &self.config,
                    move |out: &mut [f32], _: &cpal::OutputCallbackInfo| {
                        for frame in out.chunks_mut(channels) {
                            let index = cursor.fetch_add(1, Ordering::Relaxed);
                            let sample = data.get(index).copied().unwrap_or(0.0);
                            frame.iter_mut().for_each(|s| *s = sample);
                        }
                    },
                    |err| warn!("Audio stream error: {}", err),
                    None,
                )
                .map_err(|e| AudioError::Playback(e.to_string()))?;

            stream.play().map_err(|e| AudioError::Playback(e.to_string()))?;
            thread::sleep(Duration::from_millis(tone.duration_ms as u64) + TAIL);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_notifier_always_unlocks() {
        let notifier = SilentNotifier;
        assert_eq!(notifier.unlock(), Ok(()));
        assert_eq!(notifier.unlock(), Ok(()));
        notifier.emit(CueKind::Transition);
    }

    #[test]
    fn notifiers_are_object_safe() {
        let notifiers: Vec<Box<dyn CueNotifier>> = vec![Box::new(SilentNotifier), Box::new(ToneNotifier::new())];
        assert_eq!(notifiers.len(), 2);
    }
}
