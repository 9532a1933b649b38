//! Service availability API Module
//!
//! # Routes
//!
//! | Path | Method | Notes |
//! |------|--------|-------|
//! | /api/service/status | GET | current flag |
//! | /api/service/stop | POST | stop accepting orders |
//! | /api/service/start | POST | resume |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Service availability router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/service", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/status", get(handler::status))
        .route("/stop", post(handler::stop))
        .route("/start", post(handler::start))
}
