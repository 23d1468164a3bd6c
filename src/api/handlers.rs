//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::{state::AppState, tasks::Control};
use super::responses::{ControlResponse, HealthResponse, StatusResponse};

/// Queue a control command, mapping a finished countdown task to 410
async fn forward(state: &AppState, control: Control, message: &str) -> Result<Json<ControlResponse>, StatusCode> {
    match state.send_control(control).await {
        Ok(()) => {
            info!("Control endpoint called - {}", message);
            Ok(Json(ControlResponse::accepted(message.to_string(), state.snapshot())))
        }
        Err(e) => {
            error!("Failed to forward {:?}: {}", control, e);
            Err(StatusCode::GONE)
        }
    }
}

/// Handle POST /hide - Board hidden, suspend ticking
pub async fn hide_handler(State(state): State<Arc<AppState>>) -> Result<Json<ControlResponse>, StatusCode> {
    forward(&state, Control::Hide, "Board hidden").await
}

/// Handle POST /show - Board visible, tick and resume
pub async fn show_handler(State(state): State<Arc<AppState>>) -> Result<Json<ControlResponse>, StatusCode> {
    forward(&state, Control::Show, "Board visible").await
}

/// Handle POST /stop - Tear the countdown down
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ControlResponse>, StatusCode> {
    forward(&state, Control::Stop, "Countdown stopping").await
}

/// Handle GET /status - Current countdown snapshot
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let countdown = state.snapshot();

    Json(StatusResponse {
        remaining_seconds: countdown.remaining.total_seconds(),
        countdown,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
