//! Countdown tick driver background task

use std::sync::Arc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::{AppState, TickOutcome};

/// Background task that pulses the countdown once per tick period while running
///
/// The driver sleeps on the control channel while the countdown is idle or
/// paused. Each run gets a fresh interval, so the first tick lands one full
/// period after the start command. Late ticks are delayed rather than
/// bunched; elapsed wall time is not reconciled.
pub async fn tick_driver_task(state: Arc<AppState>) {
    info!("Starting tick driver task");

    let mut control_rx = state.subscribe_control();

    loop {
        let control = *control_rx.borrow_and_update();

        if !control.is_running() {
            debug!("Tick driver idle ({:?})", control.status);
            if control_rx.changed().await.is_err() {
                break;
            }
            continue;
        }

        debug!("Tick driver running for run {}", control.run_id);
        let period = state.tick_period;
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match state.tick(control.run_id) {
                        Ok(TickOutcome::Counting(_)) => {}
                        Ok(TickOutcome::Expired(_)) => {
                            debug!("Run {} expired, tick driver halting", control.run_id);
                            break;
                        }
                        Ok(TickOutcome::Stale) => break,
                        Err(e) => {
                            error!("Failed to advance countdown, stopping tick driver: {}", e);
                            return;
                        }
                    }
                }

                // Any control change cancels this run's interval
                changed = control_rx.changed() => {
                    if changed.is_err() {
                        info!("Control channel closed, stopping tick driver");
                        return;
                    }
                    break;
                }
            }
        }
    }

    info!("Tick driver task finished");
}
