//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::error;

use crate::{
    error::Result,
    state::AppState,
    timer::TimerSnapshot,
};
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

type CommandResult = std::result::Result<Json<ApiResponse>, StatusCode>;

/// Turn the outcome of a timer command into an HTTP response
fn respond(action: &str, result: Result<TimerSnapshot>, message: &str) -> CommandResult {
    match result {
        Ok(timer) => Ok(Json(ApiResponse::new(message.to_string(), timer))),
        Err(e) => {
            error!("Failed to {} timer: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start - Start or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    respond("start", state.start(), "Timer started")
}

/// Handle POST /pause - Pause the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    respond("pause", state.pause(), "Timer paused")
}

/// Handle POST /toggle - Pause if running, start otherwise
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    let result = state.toggle();
    let message = match &result {
        Ok(timer) if timer.is_running => "Timer started",
        _ => "Timer paused",
    };
    respond("toggle", result, message)
}

/// Handle POST /reset - Pause and restore the default focus phase
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    respond("reset", state.reset(), "Timer reset")
}

/// Handle POST /focus/increase - Extend the focus duration by one minute
pub async fn focus_increase_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    respond("adjust", state.increase_focus(), "Focus duration increased")
}

/// Handle POST /focus/decrease - Shorten the focus duration by one minute
pub async fn focus_decrease_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    respond("adjust", state.decrease_focus(), "Focus duration decreased")
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> std::result::Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
        last_notify_error: state.get_notify_error(),
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
