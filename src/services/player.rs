//! Audio playback through an external player program

use std::{
    collections::HashMap,
    path::PathBuf,
    sync::RwLock,
};
use futures::future::BoxFuture;
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::cues::Cue;

/// Audio collaborator consumed by the cue dispatcher
///
/// `play` hands back a future so the caller decides where it runs; the
/// dispatcher always spawns it away from the tick path.
pub trait CuePlayer: Send + Sync {
    /// Prepare sound assets, returning how many cues are playable
    fn load(&self) -> BoxFuture<'_, Result<usize, String>>;

    /// Play a single cue to completion
    fn play(&self, cue: Cue) -> BoxFuture<'static, Result<(), String>>;
}

/// Plays cues by launching `<program> <asset>` for each one
#[derive(Debug)]
pub struct CommandPlayer {
    program: String,
    sounds_dir: PathBuf,
    assets: RwLock<HashMap<Cue, PathBuf>>,
}

impl CommandPlayer {
    pub fn new(program: impl Into<String>, sounds_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            sounds_dir: sounds_dir.into(),
            assets: RwLock::new(HashMap::new()),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn asset_for(&self, cue: Cue) -> Option<PathBuf> {
        self.assets.read().ok().and_then(|assets| assets.get(&cue).cloned())
    }
}

impl CuePlayer for CommandPlayer {
    fn load(&self) -> BoxFuture<'_, Result<usize, String>> {
        Box::pin(async move {
            debug!("Probing sound assets in {}", self.sounds_dir.display());

            let mut found = HashMap::new();
            for cue in Cue::ALL {
                let path = self.sounds_dir.join(cue.file_name());
                match tokio::fs::metadata(&path).await {
                    Ok(meta) if meta.is_file() => {
                        found.insert(cue, path);
                    }
                    Ok(_) => warn!("{} is not a regular file, {} cue will be silent", path.display(), cue),
                    Err(e) => warn!("Missing sound {} ({}), {} cue will be silent", path.display(), e, cue),
                }
            }

            let count = found.len();
            let mut assets = self.assets.write()
                .map_err(|e| format!("Failed to lock sound assets: {}", e))?;
            *assets = found;

            info!("Loaded {}/{} sound assets", count, Cue::ALL.len());
            Ok(count)
        })
    }

    fn play(&self, cue: Cue) -> BoxFuture<'static, Result<(), String>> {
        let asset = self.asset_for(cue);
        let program = self.program.clone();

        Box::pin(async move {
            let path = asset.ok_or_else(|| format!("{} sound not available", cue))?;

            let output = Command::new(&program)
                .arg(&path)
                .output()
                .await
                .map_err(|e| format!("Failed to execute {}: {}", program, e))?;

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(format!("{} exited with {}: {}", program, output.status, stderr.trim()));
            }

            Ok(())
        })
    }
}
