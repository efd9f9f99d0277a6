//! State management module
//!
//! The countdown engine, its configuration and run state, and the shared
//! application state that serializes access to them.

pub mod app_state;
pub mod engine;
pub mod run_state;
pub mod timer_config;

// Re-export main types
pub use app_state::{AppState, CommandOutcome, TICK_PERIOD};
pub use engine::{CountdownEngine, TickOutcome, TimerSnapshot};
pub use run_state::{RunControl, RunState, RunStatus};
pub use timer_config::{ConfigField, ConfigUpdate, Hms, HmsUnit, StepDirection, TimerConfig, TimerMode};
