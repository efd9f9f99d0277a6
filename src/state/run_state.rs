//! Run state of the countdown

use serde::{Deserialize, Serialize};

/// Whether the countdown is ticking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    #[default]
    Idle,
    Running,
    Paused,
}

impl RunStatus {
    /// Label shown next to the clock
    pub fn label(self) -> &'static str {
        match self {
            RunStatus::Idle => "Ready",
            RunStatus::Running => "Running",
            RunStatus::Paused => "Paused",
        }
    }
}

/// Mutable per-run countdown state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunState {
    pub remaining: u64,
    pub status: RunStatus,
    pub warning_fired: bool,
    pub next_beep_at: Option<u64>,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// What the tick driver needs to know to schedule ticks
///
/// `run_id` changes on every status transition so a tick scheduled under an
/// earlier run can be told apart from a current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunControl {
    pub status: RunStatus,
    pub run_id: u64,
}

impl RunControl {
    pub fn is_running(&self) -> bool {
        self.status == RunStatus::Running
    }
}
