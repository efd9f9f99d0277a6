//! Fire-and-forget cue dispatch

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tracing::{debug, error, warn};

use super::{cues::Cue, player::CuePlayer};

/// Hands cues to the audio collaborator without waiting on playback
///
/// Cues dispatched before `load_cues` has finished are dropped.
pub struct CueDispatcher {
    player: Arc<dyn CuePlayer>,
    loaded: AtomicBool,
}

impl CueDispatcher {
    pub fn new(player: Arc<dyn CuePlayer>) -> Self {
        Self {
            player,
            loaded: AtomicBool::new(false),
        }
    }

    /// Run the one-time asset loading phase
    ///
    /// Always ends with the dispatcher marked loaded, even when the player
    /// reports an error, so a broken audio setup never blocks the countdown.
    pub async fn load_cues(&self) {
        match self.player.load().await {
            Ok(0) => warn!("No sound assets available, cues will be silent"),
            Ok(count) => debug!("{} cues ready for playback", count),
            Err(e) => error!("Error loading sounds: {}", e),
        }
        self.loaded.store(true, Ordering::Release);
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    /// Request playback of a cue and return immediately
    pub fn dispatch(&self, cue: Cue) {
        if !self.is_loaded() {
            debug!("Sounds not loaded yet, dropping {} cue", cue);
            return;
        }

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!("No async runtime available, dropping {} cue", cue);
            return;
        };

        let playback = self.player.play(cue);
        handle.spawn(async move {
            match playback.await {
                Ok(()) => debug!("{} cue played", cue),
                Err(e) => warn!("Failed to play {} cue: {}", cue, e),
            }
        });
    }
}

impl std::fmt::Debug for CueDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CueDispatcher")
            .field("loaded", &self.is_loaded())
            .finish_non_exhaustive()
    }
}
