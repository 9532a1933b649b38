//! API routing module
//!
//! # Structure
//!
//! - [`health`] - liveness probe
//! - [`orders`] - submission, queue views and staff actions
//! - [`payment`] - screenshot attestation and UPI details
//! - [`service`] - availability flag
//!
//! Routers carry `ServerState`; one resource per submodule with its
//! handlers in `handler.rs`.

pub mod health;
pub mod orders;
pub mod payment;
pub mod service;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(orders::router())
        .merge(payment::router())
        .merge(service::router())
}

/// Build the fully configured application with all middleware
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(axum::extract::DefaultBodyLimit::max(
            state.config.max_total_size,
        ))
}
