//! Service availability handlers

use axum::{Form, Json, extract::State};
use serde::Deserialize;

use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok_with_message};
use shared::ServiceStatus;

/// Default message shown to students while stopped
const DEFAULT_STOP_MESSAGE: &str =
    "Print service is temporarily unavailable. Please try again later.";

#[derive(Debug, Deserialize)]
pub struct StopRequest {
    pub message: Option<String>,
    pub stopped_by: Option<String>,
}

pub async fn status(State(state): State<ServerState>) -> Json<ServiceStatus> {
    Json(state.status.status())
}

pub async fn stop(
    State(state): State<ServerState>,
    Form(request): Form<StopRequest>,
) -> AppResult<Json<AppResponse<ServiceStatus>>> {
    let message = request
        .message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_STOP_MESSAGE.to_string());
    let stopped_by = request.stopped_by.unwrap_or_else(|| "owner".to_string());

    let status = state.status.stop(message, stopped_by);
    Ok(ok_with_message(status, "Service stopped"))
}

pub async fn start(State(state): State<ServerState>) -> AppResult<Json<AppResponse<ServiceStatus>>> {
    let status = state.status.start();
    Ok(ok_with_message(status, "Service resumed"))
}
