//! Cue tone synthesis

use std::f32::consts::TAU;

use crate::sequencer::CueKind;

/// Envelope floor; an exponential ramp cannot start or end at zero
const SILENCE: f32 = 0.0001;
const ATTACK_SECS: f32 = 0.005;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
}

/// A short beep: fast exponential attack then exponential decay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq_hz: f32,
    pub duration_ms: u32,
    pub gain: f32,
    pub waveform: Waveform,
}

impl Tone {
    /// Small, clean beep for the last seconds of an interval
    pub const COUNTDOWN: Tone = Tone {
        freq_hz: 880.0,
        duration_ms: 80,
        gain: 0.08,
        waveform: Waveform::Sine,
    };

    /// Louder, sharper beep when the next interval begins
    pub const TRANSITION: Tone = Tone {
        freq_hz: 1046.5,
        duration_ms: 140,
        gain: 0.18,
        waveform: Waveform::Square,
    };

    pub fn for_cue(cue: CueKind) -> Self {
        match cue {
            CueKind::Countdown => Self::COUNTDOWN,
            CueKind::Transition => Self::TRANSITION,
        }
    }

    fn duration_secs(&self) -> f32 {
        self.duration_ms as f32 / 1000.0
    }

    fn envelope(&self, t: f32) -> f32 {
        let duration = self.duration_secs();
        if t < ATTACK_SECS {
            SILENCE * (self.gain / SILENCE).powf(t / ATTACK_SECS)
        } else if t < duration {
            let progress = (t - ATTACK_SECS) / (duration - ATTACK_SECS);
            self.gain * (SILENCE / self.gain).powf(progress)
        } else {
            0.0
        }
    }

    fn oscillator(&self, t: f32) -> f32 {
        let phase = (TAU * self.freq_hz * t).sin();
        match self.waveform {
            Waveform::Sine => phase,
            Waveform::Square if phase >= 0.0 => 1.0,
            Waveform::Square => -1.0,
        }
    }

    /// Mono samples for the whole tone at `sample_rate`
    pub fn render(&self, sample_rate: u32) -> Vec<f32> {
        let frames = (self.duration_secs() * sample_rate as f32).round() as usize;
        (0..frames)
            .map(|frame| {
                let t = frame as f32 / sample_rate as f32;
                self.oscillator(t) * self.envelope(t)
            })
            .collect()
    }
}
