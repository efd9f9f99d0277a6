//! Named audio cues and their sound assets

use std::fmt;

use serde::{Deserialize, Serialize};

/// Audio signal requested by the countdown engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    /// Played on every start or resume
    Start,
    /// Exam mode pre-expiry warning
    Warning,
    /// Repeating mode interval beep
    Interval,
    /// Natural expiry alarm
    End,
}

impl Cue {
    pub const ALL: [Cue; 4] = [Cue::Start, Cue::Warning, Cue::Interval, Cue::End];

    /// Asset file name looked up in the sounds directory
    pub fn file_name(self) -> &'static str {
        match self {
            Cue::Start => "start.mp3",
            Cue::Warning => "warning.mp3",
            Cue::Interval => "interval.mp3",
            Cue::End => "end_alarm.mp3",
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Cue::Start => "Start",
            Cue::Warning => "Warning",
            Cue::Interval => "Interval",
            Cue::End => "End",
        };
        f.write_str(name)
    }
}
