//! Order API Handlers

use std::collections::HashMap;
use std::str::FromStr;

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::orders::SubmitRequest;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message, validation};
use shared::{Order, OrderSummary, PrintSettings, QueueStats};

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// `pending` restricts the list to the live queue
    pub status: Option<String>,
}

/// Parse an optional settings field, falling back to the enum's default.
fn parse_setting<T>(fields: &HashMap<String, String>, key: &str) -> AppResult<T>
where
    T: FromStr<Err = String> + Default,
{
    match fields.get(key) {
        Some(value) if !value.trim().is_empty() => {
            value.trim().parse().map_err(AppError::Validation)
        }
        _ => Ok(T::default()),
    }
}

/// Submit a new print order (multipart: `files` + form fields).
///
/// Upload limits are enforced while the body streams in; everything else
/// is validated before the CPU-heavy pipeline runs on a blocking thread.
pub async fn create(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<AppResponse<OrderSummary>>> {
    let mut files: Vec<(String, Vec<u8>)> = Vec::new();
    let mut total_size = 0usize;
    let mut fields: HashMap<String, String> = HashMap::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "files" {
            if files.len() >= state.config.max_files {
                return Err(AppError::validation(format!(
                    "Maximum {} files allowed",
                    state.config.max_files
                )));
            }

            let filename = field.file_name().unwrap_or("document.pdf").to_string();
            if !filename.to_lowercase().ends_with(".pdf") {
                return Err(AppError::validation(format!(
                    "{filename}: only PDF files are accepted"
                )));
            }

            let bytes = field.bytes().await?;
            if bytes.len() > state.config.max_file_size {
                return Err(AppError::validation(format!(
                    "File {filename} exceeds {} MB limit",
                    state.config.max_file_size / (1024 * 1024)
                )));
            }
            total_size += bytes.len();
            if total_size > state.config.max_total_size {
                return Err(AppError::validation("Total file size exceeds limit"));
            }

            files.push((filename, bytes.to_vec()));
        } else {
            fields.insert(name, field.text().await?);
        }
    }

    let student_name = validation::validate_student_name(
        fields.get("student_name").map(String::as_str).unwrap_or(""),
    )
    .map_err(AppError::Validation)?;
    let student_id = validation::validate_student_id(
        fields.get("student_id").map(String::as_str).unwrap_or(""),
    )
    .map_err(AppError::Validation)?;
    let instructions = validation::sanitize_instructions(
        fields.get("instructions").map(String::as_str).unwrap_or(""),
    );
    let transaction_id = fields
        .get("transaction_id")
        .map(|v| validation::sanitize_transaction_id(v))
        .filter(|v| !v.is_empty());

    let copies = match fields.get("copies") {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|_| AppError::validation("copies must be a number"))?,
        _ => 1,
    };
    let settings = PrintSettings {
        color_mode: parse_setting(&fields, "color_mode")?,
        paper_type: parse_setting(&fields, "paper_type")?,
        print_sides: parse_setting(&fields, "print_sides")?,
        page_size: parse_setting(&fields, "page_size")?,
        binding: parse_setting(&fields, "binding")?,
        copies,
    };

    let request = SubmitRequest {
        student_name,
        student_id,
        instructions,
        settings,
        transaction_id,
        files,
    };

    // PDF parsing, merge and pricing are pure CPU work
    let orders = state.orders.clone();
    let order = tokio::task::spawn_blocking(move || orders.submit(request))
        .await
        .map_err(|e| AppError::internal(e.to_string()))??;

    let summary = state.orders.summarize(order)?;
    Ok(ok_with_message(summary, "Order created"))
}

/// List orders, newest first (or the pending queue in position order).
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<Vec<OrderSummary>>>> {
    let pending_only = query.status.as_deref() == Some("pending");
    Ok(ok(state.orders.list(pending_only)?))
}

/// Get order details by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<OrderSummary>>> {
    let order = state.orders.get(&id)?;
    Ok(ok(state.orders.summarize(order)?))
}

/// Download the merged PDF of the head order
pub async fn download(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let (order, artifact) = state.orders.download(&id)?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=order_{}.pdf", order.id),
        ),
    ];
    Ok((headers, artifact).into_response())
}

/// Mark the head order as completed
pub async fn complete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Order>>> {
    let order = state.orders.complete(&id)?;
    Ok(ok_with_message(order, "Order marked as completed"))
}

/// Mark the head order as not completed (kept for history)
pub async fn not_complete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Order>>> {
    let order = state.orders.reject(&id)?;
    Ok(ok_with_message(order, "Order marked as not completed"))
}

/// Erase the head order and its PDF
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Order>>> {
    let order = state.orders.remove(&id)?;
    Ok(ok_with_message(order, "Order removed"))
}

/// Queue statistics
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<AppResponse<QueueStats>>> {
    Ok(ok(state.orders.stats()?))
}
