//! Countdown engine state machine.
//!
//! The engine owns configuration and run state but holds no timer of its
//! own: the tick driver calls [`CountdownEngine::tick`] once per second and
//! the caller forwards any returned cues to the dispatcher.
//!
//! ```text
//! Idle --start--> Running --pause--> Paused --start--> Running
//!   ^                |                  |
//!   +---stop/reset---+------------------+
//!   +------------- expiry (End cue) ----+
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    run_state::{RunControl, RunState, RunStatus},
    timer_config::{ConfigUpdate, TimerConfig, TimerMode},
};
use crate::{services::Cue, utils::format_hms};

/// Result of a single tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Tick arrived while not running or for an earlier run and was ignored
    Stale,
    /// Countdown advanced and keeps running
    Counting(Vec<Cue>),
    /// Countdown reached zero and stopped
    Expired(Vec<Cue>),
}

impl TickOutcome {
    pub fn cues(&self) -> &[Cue] {
        match self {
            TickOutcome::Stale => &[],
            TickOutcome::Counting(cues) | TickOutcome::Expired(cues) => cues,
        }
    }
}

/// Read-only view handed to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub mode: TimerMode,
    pub status: RunStatus,
    pub status_label: String,
    /// Remaining time as `HH:MM:SS`
    pub remaining: String,
    pub remaining_seconds: u64,
    /// Clock face: remaining time, or the configured duration when idle at zero
    pub display: String,
    pub warning_fired: bool,
    pub next_beep_at: Option<u64>,
    pub next_beep_display: Option<String>,
    pub config: TimerConfig,
}

#[derive(Debug, Clone, Default)]
pub struct CountdownEngine {
    config: TimerConfig,
    run: RunState,
    run_id: u64,
}

impl CountdownEngine {
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            run: RunState::new(),
            run_id: 0,
        }
    }

    // Queries

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn run_state(&self) -> &RunState {
        &self.run
    }

    pub fn status(&self) -> RunStatus {
        self.run.status
    }

    pub fn remaining(&self) -> u64 {
        self.run.remaining
    }

    pub fn control(&self) -> RunControl {
        RunControl {
            status: self.run.status,
            run_id: self.run_id,
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let shown = if self.run.remaining > 0 {
            self.run.remaining
        } else {
            self.config.duration_secs
        };

        TimerSnapshot {
            mode: self.config.mode,
            status: self.run.status,
            status_label: self.run.status.label().to_string(),
            remaining: format_hms(self.run.remaining),
            remaining_seconds: self.run.remaining,
            display: format_hms(shown),
            warning_fired: self.run.warning_fired,
            next_beep_at: self.run.next_beep_at,
            next_beep_display: self.run.next_beep_at.map(format_hms),
            config: self.config,
        }
    }

    // Commands

    /// Apply a configuration change
    ///
    /// The mode can be switched at any time. Durations are only editable
    /// while idle; outside idle they are dropped and only a mode change
    /// counts as applied. A mid-run switch keeps the run's markers, so a
    /// run seeded outside Repeating mode never schedules interval beeps.
    pub fn configure(&mut self, update: &ConfigUpdate) -> bool {
        if self.run.status == RunStatus::Idle {
            self.config.apply(update);
            return true;
        }

        let durations = ConfigUpdate { mode: None, ..*update };
        if !durations.is_empty() {
            debug!("Ignoring duration change while {:?}", self.run.status);
        }

        match update.mode {
            Some(mode) if mode != self.config.mode => {
                debug!("Switching mode to {} while {:?}", mode, self.run.status);
                self.config.mode = mode;
                true
            }
            _ => false,
        }
    }

    /// Start a fresh run or resume a paused one
    ///
    /// Returns the Start cue when the command took effect. A zero duration
    /// with nothing left to resume does nothing.
    pub fn start(&mut self) -> Option<Cue> {
        if self.run.status == RunStatus::Running {
            return None;
        }

        if self.run.remaining == 0 {
            if self.config.duration_secs == 0 {
                debug!("Refusing to start a zero-length countdown");
                return None;
            }
            self.run.remaining = self.config.duration_secs;
            self.run.next_beep_at = self.config.first_beep_at();
            self.run.warning_fired = false;
        }

        self.run.status = RunStatus::Running;
        self.run_id += 1;
        Some(Cue::Start)
    }

    pub fn pause(&mut self) -> bool {
        if self.run.status != RunStatus::Running {
            return false;
        }
        self.run.status = RunStatus::Paused;
        self.run_id += 1;
        true
    }

    /// Abandon the run; never sounds the End cue
    pub fn stop(&mut self) -> bool {
        self.run = RunState::new();
        self.run_id += 1;
        true
    }

    /// Rewind to the full configured duration, ready to start
    pub fn reset(&mut self) -> bool {
        self.run = RunState {
            remaining: self.config.duration_secs,
            status: RunStatus::Idle,
            warning_fired: false,
            next_beep_at: self.config.first_beep_at(),
        };
        self.run_id += 1;
        true
    }

    /// Advance one second for the run identified by `run_id`
    pub fn tick(&mut self, run_id: u64) -> TickOutcome {
        if self.run.status != RunStatus::Running || run_id != self.run_id {
            return TickOutcome::Stale;
        }

        let mut cues = Vec::new();
        let new_remaining = self.run.remaining.saturating_sub(1);

        if self.config.mode == TimerMode::Exam
            && !self.run.warning_fired
            && new_remaining == self.config.warning_offset_secs
        {
            cues.push(Cue::Warning);
            self.run.warning_fired = true;
        }

        let interval = self.config.beep_interval_secs;
        if self.config.mode == TimerMode::Repeating
            && new_remaining > 0
            && interval > 0
            && self.run.next_beep_at == Some(new_remaining)
        {
            cues.push(Cue::Interval);
            // Markers at or below zero can never match again.
            self.run.next_beep_at = new_remaining.checked_sub(interval).filter(|&at| at > 0);
        }

        if new_remaining == 0 {
            cues.push(Cue::End);
            self.run.remaining = 0;
            self.run.status = RunStatus::Idle;
            self.run_id += 1;
            return TickOutcome::Expired(cues);
        }

        self.run.remaining = new_remaining;
        TickOutcome::Counting(cues)
    }
}
