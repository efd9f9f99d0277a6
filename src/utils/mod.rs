//! Utility functions module
//!
//! Time formatting and process signal helpers shared by the binary and the API.

pub mod signals;
pub mod time_format;

// Re-export main functions
pub use signals::shutdown_signal;
pub use time_format::{format_hms, parse_hms};
