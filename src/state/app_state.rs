//! Shared application state: the engine behind a lock plus its collaborators

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info};

use super::{
    engine::{CountdownEngine, TickOutcome, TimerSnapshot},
    run_state::RunControl,
    timer_config::{ConfigField, ConfigUpdate, Hms, HmsUnit, StepDirection, TimerConfig},
};
use crate::services::{Cue, CueDispatcher, CuePlayer};

/// Period of the countdown pulse
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Result of a command issued against the engine
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    /// False when the command was ignored in the current state
    pub applied: bool,
    pub snapshot: TimerSnapshot,
}

/// Application state shared by the HTTP handlers and the tick driver
///
/// Every mutation of configuration and run state happens under `engine`'s
/// lock. Cues are dispatched after the lock is released.
#[derive(Debug)]
pub struct AppState {
    engine: Mutex<CountdownEngine>,
    dispatcher: CueDispatcher,
    pub tick_period: Duration,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last applied command
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Scheduling signal for the tick driver
    control_tx: watch::Sender<RunControl>,
    /// Keep the receiver alive to prevent channel closure
    _control_rx: watch::Receiver<RunControl>,
}

impl AppState {
    pub fn new(port: u16, host: String, config: TimerConfig, player: Arc<dyn CuePlayer>) -> Self {
        let engine = CountdownEngine::new(config);
        let (control_tx, control_rx) = watch::channel(engine.control());

        Self {
            engine: Mutex::new(engine),
            dispatcher: CueDispatcher::new(player),
            tick_period: TICK_PERIOD,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            control_tx,
            _control_rx: control_rx,
        }
    }

    /// Override the tick period (tests use sub-second pulses)
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    /// Run `op` under the engine lock, signal the driver and dispatch its cue
    fn command<F>(&self, action: &str, op: F) -> Result<CommandOutcome, String>
    where
        F: FnOnce(&mut CountdownEngine) -> (bool, Option<Cue>),
    {
        let mut engine = self.engine.lock()
            .map_err(|e| format!("Failed to lock countdown engine: {}", e))?;

        let (applied, cue) = op(&mut *engine);
        let snapshot = engine.snapshot();
        // Published under the lock so the driver sees transitions in order.
        self.publish(engine.control());
        drop(engine);

        if applied {
            info!("{} applied: {} remaining ({})", action, snapshot.remaining, snapshot.status_label);
            self.record_action(action);
        } else {
            debug!("{} ignored while {}", action, snapshot.status_label);
        }

        if let Some(cue) = cue {
            self.dispatcher.dispatch(cue);
        }

        Ok(CommandOutcome { applied, snapshot })
    }

    fn publish(&self, control: RunControl) {
        self.control_tx.send_if_modified(|current| {
            if *current == control {
                false
            } else {
                *current = control;
                true
            }
        });
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    pub fn start(&self) -> Result<CommandOutcome, String> {
        self.command("start", |engine| {
            let cue = engine.start();
            (cue.is_some(), cue)
        })
    }

    pub fn pause(&self) -> Result<CommandOutcome, String> {
        self.command("pause", |engine| (engine.pause(), None))
    }

    pub fn stop(&self) -> Result<CommandOutcome, String> {
        self.command("stop", |engine| (engine.stop(), None))
    }

    pub fn reset(&self) -> Result<CommandOutcome, String> {
        self.command("reset", |engine| (engine.reset(), None))
    }

    pub fn configure(&self, update: &ConfigUpdate) -> Result<CommandOutcome, String> {
        self.command("configure", |engine| (engine.configure(update), None))
    }

    /// Nudge one picker column of a duration field, wrapping at its bounds
    pub fn step_picker(
        &self,
        field: ConfigField,
        unit: HmsUnit,
        direction: StepDirection,
    ) -> Result<CommandOutcome, String> {
        self.command("configure", |engine| {
            let current = Hms::from_secs(engine.config().field(field));
            let next = current.step(unit, direction).total_secs();
            (engine.configure(&ConfigUpdate::set_field(field, next)), None)
        })
    }

    /// Advance the countdown for the run the tick was scheduled under
    pub fn tick(&self, run_id: u64) -> Result<TickOutcome, String> {
        let mut engine = self.engine.lock()
            .map_err(|e| format!("Failed to lock countdown engine: {}", e))?;

        let outcome = engine.tick(run_id);
        if outcome == TickOutcome::Stale {
            debug!("Discarding stale tick for run {}", run_id);
            return Ok(outcome);
        }

        let snapshot = engine.snapshot();
        self.publish(engine.control());
        drop(engine);

        if let TickOutcome::Expired(_) = outcome {
            info!("Countdown finished");
        }
        for &cue in outcome.cues() {
            debug!("{} cue at {}", cue, snapshot.remaining);
            self.dispatcher.dispatch(cue);
        }

        Ok(outcome)
    }

    /// Get the current timer snapshot
    pub fn snapshot(&self) -> Result<TimerSnapshot, String> {
        self.engine.lock()
            .map(|engine| engine.snapshot())
            .map_err(|e| format!("Failed to lock countdown engine: {}", e))
    }

    pub fn subscribe_control(&self) -> watch::Receiver<RunControl> {
        self.control_tx.subscribe()
    }

    /// Run the audio collaborator's one-time loading phase
    pub async fn load_cues(&self) {
        self.dispatcher.load_cues().await;
    }

    pub fn sounds_loaded(&self) -> bool {
        self.dispatcher.is_loaded()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{RunStatus, TimerMode};
    use futures::future::BoxFuture;

    #[derive(Default)]
    struct Recorder {
        played: Mutex<Vec<Cue>>,
    }

    impl CuePlayer for Recorder {
        fn load(&self) -> BoxFuture<'_, Result<usize, String>> {
            Box::pin(async { Ok(4) })
        }

        fn play(&self, cue: Cue) -> BoxFuture<'static, Result<(), String>> {
            self.played.lock().unwrap().push(cue);
            Box::pin(async { Ok(()) })
        }
    }

    async fn state(config: TimerConfig) -> (AppState, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let state = AppState::new(0, "127.0.0.1".to_string(), config, recorder.clone());
        state.load_cues().await;
        (state, recorder)
    }

    fn exam(duration: u64, warning: u64) -> TimerConfig {
        TimerConfig {
            mode: TimerMode::Exam,
            duration_secs: duration,
            warning_offset_secs: warning,
            beep_interval_secs: 0,
        }
    }

    #[tokio::test]
    async fn start_dispatches_cue_and_signals_driver() {
        let (state, recorder) = state(exam(10, 3)).await;
        let control_rx = state.subscribe_control();

        let outcome = state.start().unwrap();
        assert!(outcome.applied);
        assert_eq!(outcome.snapshot.status, RunStatus::Running);
        assert!(control_rx.borrow().is_running());
        assert_eq!(*recorder.played.lock().unwrap(), vec![Cue::Start]);
        assert_eq!(state.get_last_action().0.as_deref(), Some("start"));
    }

    #[tokio::test]
    async fn ticks_dispatch_scheduled_cues() {
        let (state, recorder) = state(exam(4, 2)).await;
        state.start().unwrap();
        let run_id = state.subscribe_control().borrow().run_id;

        for _ in 0..4 {
            state.tick(run_id).unwrap();
        }
        assert_eq!(
            *recorder.played.lock().unwrap(),
            vec![Cue::Start, Cue::Warning, Cue::End]
        );
        assert_eq!(state.snapshot().unwrap().status, RunStatus::Idle);
        assert!(!state.subscribe_control().borrow().is_running());
    }

    #[tokio::test]
    async fn stale_tick_after_pause_changes_nothing() {
        let (state, _) = state(exam(10, 3)).await;
        state.start().unwrap();
        let run_id = state.subscribe_control().borrow().run_id;
        state.tick(run_id).unwrap();

        state.pause().unwrap();
        assert_eq!(state.tick(run_id).unwrap(), TickOutcome::Stale);
        assert_eq!(state.snapshot().unwrap().remaining_seconds, 9);

        // Resuming opens a new run; the old tick stays stale.
        state.start().unwrap();
        assert_eq!(state.tick(run_id).unwrap(), TickOutcome::Stale);
    }

    #[tokio::test]
    async fn ignored_commands_are_not_recorded() {
        let (state, recorder) = state(exam(0, 0)).await;

        let outcome = state.start().unwrap();
        assert!(!outcome.applied);
        assert!(recorder.played.lock().unwrap().is_empty());
        assert_eq!(state.get_last_action(), (None, None));

        assert!(!state.pause().unwrap().applied);
    }

    #[tokio::test]
    async fn picker_steps_edit_configuration() {
        let (state, _) = state(exam(0, 0)).await;

        state.step_picker(ConfigField::Duration, HmsUnit::Minutes, StepDirection::Up).unwrap();
        state.step_picker(ConfigField::Duration, HmsUnit::Hours, StepDirection::Down).unwrap();
        let outcome = state
            .step_picker(ConfigField::Warning, HmsUnit::Seconds, StepDirection::Down)
            .unwrap();

        assert_eq!(outcome.snapshot.config.duration_secs, 23 * 3600 + 60);
        assert_eq!(outcome.snapshot.config.warning_offset_secs, 59);
        assert_eq!(outcome.snapshot.display, "23:01:00");
    }

    #[tokio::test]
    async fn idle_transitions_still_signal_the_driver() {
        let (state, _) = state(exam(90, 0)).await;
        let mut control_rx = state.subscribe_control();
        let _ = control_rx.borrow_and_update();

        state.reset().unwrap();
        assert!(control_rx.has_changed().unwrap());
        assert!(!control_rx.borrow_and_update().is_running());

        // A rejected command leaves the driver undisturbed.
        state.pause().unwrap();
        assert!(!control_rx.has_changed().unwrap());
    }
}
