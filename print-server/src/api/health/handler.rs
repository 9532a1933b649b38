//! Health check handlers

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;

#[derive(Serialize)]
pub struct RootResponse {
    message: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    /// Whether the shop is currently accepting orders
    service_active: bool,
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Print Order Service",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        service_active: state.status.is_active(),
    })
}
