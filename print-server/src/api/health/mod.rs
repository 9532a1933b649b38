//! Health check routes
//!
//! # Routes
//!
//! | Path | Method | Notes |
//! |------|--------|-------|
//! | / | GET | service banner |
//! | /health | GET | liveness probe |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Health router - public routes
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::root))
        .route("/health", get(handler::health))
}
