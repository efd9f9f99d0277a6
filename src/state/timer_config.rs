//! Timer configuration: mode, durations and picker editing

use std::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};

/// Countdown operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    /// Count down and sound the End cue
    #[default]
    Plain,
    /// Also sound one Warning cue `warning_offset_secs` before zero
    Exam,
    /// Also sound an Interval cue every `beep_interval_secs`
    Repeating,
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimerMode::Plain => "plain",
            TimerMode::Exam => "exam",
            TimerMode::Repeating => "repeating",
        })
    }
}

impl FromStr for TimerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" | "normal" => Ok(TimerMode::Plain),
            "exam" => Ok(TimerMode::Exam),
            "repeating" => Ok(TimerMode::Repeating),
            other => Err(format!("unknown timer mode '{}'", other)),
        }
    }
}

/// User-selected countdown settings, all in whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimerConfig {
    pub mode: TimerMode,
    pub duration_secs: u64,
    pub warning_offset_secs: u64,
    pub beep_interval_secs: u64,
}

impl TimerConfig {
    /// First Repeating beep marker for a run seeded from `duration_secs`
    pub fn first_beep_at(&self) -> Option<u64> {
        let interval = self.beep_interval_secs;
        if self.mode == TimerMode::Repeating && interval > 0 && interval < self.duration_secs {
            Some(self.duration_secs - interval)
        } else {
            None
        }
    }

    /// Overwrite the fields present in `update`
    pub fn apply(&mut self, update: &ConfigUpdate) {
        if let Some(mode) = update.mode {
            self.mode = mode;
        }
        if let Some(duration) = update.duration_secs {
            self.duration_secs = duration;
        }
        if let Some(offset) = update.warning_offset_secs {
            self.warning_offset_secs = offset;
        }
        if let Some(interval) = update.beep_interval_secs {
            self.beep_interval_secs = interval;
        }
    }

    pub fn field(&self, field: ConfigField) -> u64 {
        match field {
            ConfigField::Duration => self.duration_secs,
            ConfigField::Warning => self.warning_offset_secs,
            ConfigField::Interval => self.beep_interval_secs,
        }
    }
}

/// Partial configuration change; absent fields are left untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfigUpdate {
    #[serde(default)]
    pub mode: Option<TimerMode>,
    #[serde(default)]
    pub duration_secs: Option<u64>,
    #[serde(default)]
    pub warning_offset_secs: Option<u64>,
    #[serde(default)]
    pub beep_interval_secs: Option<u64>,
}

impl ConfigUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Update setting a single duration field
    pub fn set_field(field: ConfigField, secs: u64) -> Self {
        let mut update = Self::default();
        match field {
            ConfigField::Duration => update.duration_secs = Some(secs),
            ConfigField::Warning => update.warning_offset_secs = Some(secs),
            ConfigField::Interval => update.beep_interval_secs = Some(secs),
        }
        update
    }
}

/// Which duration a picker edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    Duration,
    Warning,
    Interval,
}

impl FromStr for ConfigField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "duration" => Ok(ConfigField::Duration),
            "warning" => Ok(ConfigField::Warning),
            "interval" => Ok(ConfigField::Interval),
            other => Err(format!("unknown field '{}'", other)),
        }
    }
}

/// Picker column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HmsUnit {
    Hours,
    Minutes,
    Seconds,
}

impl HmsUnit {
    /// Largest value the column shows before wrapping to zero
    pub fn max(self) -> u64 {
        match self {
            HmsUnit::Hours => 23,
            HmsUnit::Minutes | HmsUnit::Seconds => 59,
        }
    }
}

impl FromStr for HmsUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hours" => Ok(HmsUnit::Hours),
            "minutes" => Ok(HmsUnit::Minutes),
            "seconds" => Ok(HmsUnit::Seconds),
            other => Err(format!("unknown unit '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Up,
    Down,
}

impl FromStr for StepDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" | "increment" => Ok(StepDirection::Up),
            "down" | "decrement" => Ok(StepDirection::Down),
            other => Err(format!("unknown direction '{}'", other)),
        }
    }
}

/// A duration split into hour, minute and second picker columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hms {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Hms {
    /// Picker view of a duration
    ///
    /// The hours column shows at most 23, so a longer duration set through a
    /// bulk update is pulled back onto the picker's range.
    pub fn from_secs(total: u64) -> Self {
        Self {
            hours: (total / 3600).min(HmsUnit::Hours.max()),
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }

    pub fn total_secs(&self) -> u64 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }

    /// Move one column by one, wrapping between zero and the column max
    pub fn step(mut self, unit: HmsUnit, direction: StepDirection) -> Self {
        let max = unit.max();
        let value = match unit {
            HmsUnit::Hours => &mut self.hours,
            HmsUnit::Minutes => &mut self.minutes,
            HmsUnit::Seconds => &mut self.seconds,
        };
        *value = match direction {
            StepDirection::Up if *value < max => *value + 1,
            StepDirection::Up => 0,
            StepDirection::Down if *value > 0 => *value - 1,
            StepDirection::Down => max,
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_beep_requires_interval_inside_duration() {
        let mut config = TimerConfig {
            mode: TimerMode::Repeating,
            duration_secs: 20,
            warning_offset_secs: 0,
            beep_interval_secs: 5,
        };
        assert_eq!(config.first_beep_at(), Some(15));

        config.beep_interval_secs = 20;
        assert_eq!(config.first_beep_at(), None);

        config.beep_interval_secs = 0;
        assert_eq!(config.first_beep_at(), None);

        config.beep_interval_secs = 5;
        config.mode = TimerMode::Exam;
        assert_eq!(config.first_beep_at(), None);
    }

    #[test]
    fn partial_update_keeps_other_fields() {
        let mut config = TimerConfig {
            mode: TimerMode::Exam,
            duration_secs: 600,
            warning_offset_secs: 60,
            beep_interval_secs: 0,
        };
        config.apply(&ConfigUpdate::set_field(ConfigField::Warning, 120));

        assert_eq!(config.mode, TimerMode::Exam);
        assert_eq!(config.duration_secs, 600);
        assert_eq!(config.warning_offset_secs, 120);
    }

    #[test]
    fn update_deserializes_with_missing_fields() {
        let update: ConfigUpdate = serde_json::from_str(r#"{"mode":"repeating","beep_interval_secs":30}"#).unwrap();
        assert_eq!(update.mode, Some(TimerMode::Repeating));
        assert_eq!(update.beep_interval_secs, Some(30));
        assert_eq!(update.duration_secs, None);
        assert!(ConfigUpdate::default().is_empty());
    }

    #[test]
    fn picker_wraps_at_column_bounds() {
        let hms = Hms::from_secs(23 * 3600);
        assert_eq!(hms.step(HmsUnit::Hours, StepDirection::Up).hours, 0);

        let zero = Hms::default();
        assert_eq!(zero.step(HmsUnit::Hours, StepDirection::Down).hours, 23);
        assert_eq!(zero.step(HmsUnit::Minutes, StepDirection::Down).minutes, 59);
        assert_eq!(zero.step(HmsUnit::Seconds, StepDirection::Up).total_secs(), 1);

        let full = Hms { hours: 0, minutes: 0, seconds: 59 };
        assert_eq!(full.step(HmsUnit::Seconds, StepDirection::Up).total_secs(), 0);
    }

    #[test]
    fn long_durations_clamp_to_picker_range() {
        let hms = Hms::from_secs(100 * 3600 + 5 * 60 + 7);
        assert_eq!(hms, Hms { hours: 23, minutes: 5, seconds: 7 });

        assert_eq!(hms.step(HmsUnit::Hours, StepDirection::Up).hours, 0);
        assert_eq!(hms.step(HmsUnit::Hours, StepDirection::Down).hours, 22);
        assert_eq!(
            hms.step(HmsUnit::Minutes, StepDirection::Up).total_secs(),
            23 * 3600 + 6 * 60 + 7
        );
    }

    #[test]
    fn parses_path_segments() {
        assert_eq!("normal".parse::<TimerMode>(), Ok(TimerMode::Plain));
        assert_eq!("Exam".parse::<TimerMode>(), Ok(TimerMode::Exam));
        assert_eq!("interval".parse::<ConfigField>(), Ok(ConfigField::Interval));
        assert_eq!("minutes".parse::<HmsUnit>(), Ok(HmsUnit::Minutes));
        assert_eq!("down".parse::<StepDirection>(), Ok(StepDirection::Down));
        assert!("weeks".parse::<HmsUnit>().is_err());
    }
}
