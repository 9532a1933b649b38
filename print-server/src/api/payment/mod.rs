//! Payment API Module
//!
//! # Routes
//!
//! | Path | Method | Notes |
//! |------|--------|-------|
//! | /api/verify-payment | POST | screenshot multipart, ≤ 10 MB |
//! | /api/payment/upi-id | GET | recipient details for the payment page |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Payment router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/verify-payment", post(handler::verify_payment))
        .route("/api/payment/upi-id", get(handler::upi_id))
}
