//! Payment API Handlers

use axum::{
    Json,
    extract::{Multipart, State},
};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::{AppError, AppResponse, AppResult, ok};
use shared::VerificationOutcome;

/// Image content types accepted for payment screenshots
const ACCEPTED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

#[derive(Serialize)]
pub struct UpiDetails {
    upi_id: String,
    name: String,
}

/// Verify a UPI payment screenshot.
///
/// OCR is performed on the uploaded image; the extracted text must carry
/// a transaction reference and identify the configured recipient. The
/// screenshot is processed in memory and never stored.
pub async fn verify_payment(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<AppResponse<VerificationOutcome>>> {
    let mut screenshot: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("screenshot") {
            continue;
        }
        if let Some(content_type) = field.content_type()
            && !ACCEPTED_IMAGE_TYPES.contains(&content_type)
        {
            return Err(AppError::validation(format!(
                "Unsupported image type '{content_type}' (expected JPEG, PNG or WebP)"
            )));
        }

        let bytes = field.bytes().await?;
        if bytes.len() > state.config.max_screenshot_size {
            return Err(AppError::validation(format!(
                "Screenshot size exceeds {} MB limit",
                state.config.max_screenshot_size / (1024 * 1024)
            )));
        }
        screenshot = Some(bytes.to_vec());
    }

    let screenshot =
        screenshot.ok_or_else(|| AppError::validation("No screenshot uploaded"))?;

    let outcome = state.orders.verify_payment(&screenshot).await?;
    Ok(ok(outcome))
}

/// Recipient UPI details for the payment page
pub async fn upi_id(State(state): State<ServerState>) -> Json<UpiDetails> {
    let recipient = &state.config.recipient;
    Json(UpiDetails {
        upi_id: recipient.upi_id.clone(),
        name: recipient
            .name_variants
            .first()
            .cloned()
            .unwrap_or_default(),
    })
}
