//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

use crate::{
    services::default_player,
    state::{TimerConfig, TimerMode},
    utils::parse_hms,
};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "tri-timer")]
#[command(about = "A countdown timer service with exam warnings and repeating beeps")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Directory holding start.mp3, warning.mp3, interval.mp3 and end_alarm.mp3
    #[arg(long, default_value = "assets/sounds")]
    pub sounds_dir: PathBuf,

    /// Program used to play a sound file (defaults to afplay on macOS, paplay elsewhere)
    #[arg(long)]
    pub player: Option<String>,

    /// Initial timer mode: plain, exam or repeating
    #[arg(short, long, default_value = "plain")]
    pub mode: TimerMode,

    /// Initial countdown length (HH:MM:SS, MM:SS or seconds)
    #[arg(short, long, default_value = "0", value_parser = parse_hms)]
    pub duration: u64,

    /// Exam mode: sound the warning this long before the end
    #[arg(short, long, default_value = "0", value_parser = parse_hms)]
    pub warning: u64,

    /// Repeating mode: beep every interval
    #[arg(short, long, default_value = "0", value_parser = parse_hms)]
    pub interval: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn player_program(&self) -> String {
        self.player.clone().unwrap_or_else(|| default_player().to_string())
    }

    /// Timer settings applied before the server accepts commands
    pub fn timer_config(&self) -> TimerConfig {
        TimerConfig {
            mode: self.mode,
            duration_secs: self.duration,
            warning_offset_secs: self.warning,
            beep_interval_secs: self.interval,
        }
    }
}
