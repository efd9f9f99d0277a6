//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, warn};

use crate::state::{AppState, CommandOutcome, ConfigField, ConfigUpdate, HmsUnit, StepDirection};
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

fn respond(
    result: Result<CommandOutcome, String>,
    action: &str,
    applied: &str,
    ignored: &str,
) -> Result<Json<ApiResponse>, StatusCode> {
    match result {
        Ok(outcome) => Ok(Json(ApiResponse::from_outcome(outcome, applied, ignored))),
        Err(e) => {
            error!("Failed to {} countdown: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start - Start or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(
        state.start(),
        "start",
        "Countdown running",
        "Nothing to start: already running or duration is zero",
    )
}

/// Handle POST /pause - Pause a running countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(state.pause(), "pause", "Countdown paused", "Countdown is not running")
}

/// Handle POST /stop - Abandon the current run
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(state.stop(), "stop", "Countdown stopped", "Countdown already stopped")
}

/// Handle POST /reset - Rewind to the configured duration
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(state.reset(), "reset", "Countdown reset", "Countdown not reset")
}

/// Handle PUT /config - Apply a partial configuration change
pub async fn config_handler(
    State(state): State<Arc<AppState>>,
    Json(update): Json<ConfigUpdate>,
) -> Result<Json<ApiResponse>, StatusCode> {
    if update.is_empty() {
        warn!("Received empty configuration update");
    }
    respond(
        state.configure(&update),
        "configure",
        "Configuration updated",
        "Configuration is locked while the countdown is running or paused",
    )
}

/// Handle POST /config/:field/:unit/:direction - Step one picker column
pub async fn picker_handler(
    State(state): State<Arc<AppState>>,
    Path((field, unit, direction)): Path<(String, String, String)>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let parsed = field.parse::<ConfigField>().and_then(|field| {
        let unit = unit.parse::<HmsUnit>()?;
        let direction = direction.parse::<StepDirection>()?;
        Ok((field, unit, direction))
    });

    let (field, unit, direction) = match parsed {
        Ok(parts) => parts,
        Err(e) => {
            warn!("Rejected picker request: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    respond(
        state.step_picker(field, unit, direction),
        "configure",
        "Configuration updated",
        "Configuration is locked while the countdown is running or paused",
    )
}

/// Handle GET /status - Return the timer snapshot and service metadata
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.snapshot() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("Failed to read countdown state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        sounds_loaded: state.sounds_loaded(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
