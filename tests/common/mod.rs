#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use tri_timer::{
    services::{Cue, CuePlayer},
    state::{AppState, TimerConfig, TimerMode},
};

/// Player that remembers every cue it was asked to play
#[derive(Default)]
pub struct RecordingPlayer {
    played: Mutex<Vec<Cue>>,
}

impl RecordingPlayer {
    pub fn played(&self) -> Vec<Cue> {
        self.played.lock().unwrap().clone()
    }

    pub fn count(&self, cue: Cue) -> usize {
        self.played().into_iter().filter(|&c| c == cue).count()
    }
}

impl CuePlayer for RecordingPlayer {
    fn load(&self) -> BoxFuture<'_, Result<usize, String>> {
        Box::pin(async { Ok(Cue::ALL.len()) })
    }

    fn play(&self, cue: Cue) -> BoxFuture<'static, Result<(), String>> {
        self.played.lock().unwrap().push(cue);
        Box::pin(async { Ok(()) })
    }
}

pub fn timer(mode: TimerMode, duration: u64, warning: u64, interval: u64) -> TimerConfig {
    TimerConfig {
        mode,
        duration_secs: duration,
        warning_offset_secs: warning,
        beep_interval_secs: interval,
    }
}

/// App state with sounds already loaded
pub async fn loaded_state(config: TimerConfig) -> (Arc<AppState>, Arc<RecordingPlayer>) {
    let player = Arc::new(RecordingPlayer::default());
    let state = AppState::new(0, "127.0.0.1".to_string(), config, player.clone());
    state.load_cues().await;
    (Arc::new(state), player)
}
