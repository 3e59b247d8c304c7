//! Per-timer run settings

use serde::{Deserialize, Serialize};

/// How many seconds before the end of an interval the countdown beeps start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CountdownSetting {
    #[serde(rename = "none")]
    None,
    #[default]
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "10")]
    Ten,
}

impl CountdownSetting {
    /// Remaining-second values at which a countdown cue may fire
    pub fn thresholds(self) -> &'static [u64] {
        match self {
            CountdownSetting::None => &[],
            CountdownSetting::Three => &[3, 2, 1],
            CountdownSetting::Five => &[5, 4, 3, 2, 1],
            CountdownSetting::Ten => &[10, 9, 8, 7, 6, 5, 4, 3, 2, 1],
        }
    }

    pub fn contains(self, remaining_seconds: u64) -> bool {
        self.thresholds().contains(&remaining_seconds)
    }
}

/// Settings stored with a timer and read once when a run starts.
///
/// Missing fields in stored records are filled from [`TimerSettings::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimerSettings {
    /// Kept for stored records; has no effect on a run
    pub allow_overrun: bool,
    pub sound_enabled: bool,
    pub countdown_beep: CountdownSetting,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            allow_overrun: false,
            sound_enabled: true,
            countdown_beep: CountdownSetting::Three,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_sets_match_setting() {
        assert!(CountdownSetting::None.thresholds().is_empty());
        assert_eq!(CountdownSetting::Three.thresholds(), &[3, 2, 1]);
        assert!(CountdownSetting::Five.contains(5));
        assert!(!CountdownSetting::Five.contains(6));
        assert!(CountdownSetting::Ten.contains(10));
        assert!(!CountdownSetting::Ten.contains(0));
    }

    #[test]
    fn missing_fields_are_backfilled() {
        let settings: TimerSettings = serde_json::from_str(r#"{"soundEnabled": false}"#).unwrap();
        assert!(!settings.sound_enabled);
        assert_eq!(settings.countdown_beep, CountdownSetting::Three);
        assert!(!settings.allow_overrun);
    }

    #[test]
    fn countdown_setting_uses_string_tags() {
        let settings: TimerSettings = serde_json::from_str(r#"{"countdownBeep": "10"}"#).unwrap();
        assert_eq!(settings.countdown_beep, CountdownSetting::Ten);
        let json = serde_json::to_value(settings).unwrap();
        assert_eq!(json["countdownBeep"], "10");
        assert_eq!(json["soundEnabled"], true);
    }
}
