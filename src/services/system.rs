//! Host checks for the audio player

use tokio::process::Command;
use tracing::info;

/// Check whether the configured player program can be launched
///
/// Only spawnability is tested; the program's exit status is ignored since
/// many players reject `--version`.
pub async fn check_player_available(program: &str) -> Result<(), String> {
    Command::new(program)
        .arg("--version")
        .output()
        .await
        .map_err(|e| format!("{} is not available ({}). Cues will be silent.", program, e))?;

    info!("{} is available", program);
    Ok(())
}

/// Player program used when none is given on the command line
pub fn default_player() -> &'static str {
    if cfg!(target_os = "macos") {
        "afplay"
    } else {
        "paplay"
    }
}
