//! Tri Timer - A countdown timer service with three modes
//!
//! Plain countdowns, exam timers that sound a warning before expiry, and
//! repeating beepers. The countdown engine is driven by a one-second tick
//! task and asks an external audio player to sound cues without waiting on it.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
