//! Audio collaborator module
//!
//! Cue names, the player seam with its external-program implementation, and
//! the dispatcher that keeps playback off the countdown's critical path.

pub mod cues;
pub mod dispatcher;
pub mod player;
pub mod system;

// Re-export main types
pub use cues::Cue;
pub use dispatcher::CueDispatcher;
pub use player::{CommandPlayer, CuePlayer};
pub use system::{check_player_available, default_player};
