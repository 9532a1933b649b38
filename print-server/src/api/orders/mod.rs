//! Order API Module
//!
//! # Routes
//!
//! | Path | Method | Notes |
//! |------|--------|-------|
//! | /api/orders | POST | multipart submission |
//! | /api/orders | GET | list (`?status=pending` for the queue) |
//! | /api/orders/{id} | GET | order details |
//! | /api/orders/{id}/download | GET | merged PDF, head only |
//! | /api/orders/{id}/complete | POST | head only |
//! | /api/orders/{id}/not-complete | POST | head only, retains record |
//! | /api/orders/{id} | DELETE | head only, erases record |
//! | /api/stats | GET | queue statistics |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/stats", get(handler::stats))
        .nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create).get(handler::list))
        .route("/{id}", get(handler::get_by_id).delete(handler::remove))
        .route("/{id}/download", get(handler::download))
        .route("/{id}/complete", post(handler::complete))
        .route("/{id}/not-complete", post(handler::not_complete))
}
