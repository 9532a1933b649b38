use super::super::store::StoreError;
use crate::documents::DocumentError;
use crate::payment::ExtractError;
use crate::utils::AppError;
use thiserror::Error;

/// Orchestration errors
///
/// Every rejection carries a reason the API layer can render directly.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("{0}")]
    InvalidDocument(String),

    #[error("{0}")]
    InvalidSettings(String),

    #[error("{0}")]
    NotHeadOfQueue(String),

    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Payment verification failed")]
    AttestationRejected(Vec<String>),

    #[error("{0}")]
    ServiceUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ManagerResult<T> = Result<T, ManagerError>;

impl From<StoreError> for ManagerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::OrderNotFound(id) => ManagerError::NotFound(id),
            StoreError::NotHeadOfQueue(msg) => ManagerError::NotHeadOfQueue(msg),
            other => ManagerError::Storage(other),
        }
    }
}

impl From<DocumentError> for ManagerError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::Cover(msg) | DocumentError::Write(msg) => ManagerError::Internal(msg),
            other => ManagerError::InvalidDocument(other.to_string()),
        }
    }
}

impl From<ExtractError> for ManagerError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::InvalidImage(msg) => ManagerError::InvalidDocument(msg),
            ExtractError::Ocr(msg) => ManagerError::Internal(format!("OCR failed: {msg}")),
        }
    }
}

impl From<ManagerError> for AppError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::InvalidDocument(msg) | ManagerError::InvalidSettings(msg) => {
                AppError::Validation(msg)
            }
            ManagerError::NotHeadOfQueue(msg) => AppError::Forbidden(msg),
            ManagerError::NotFound(id) => AppError::NotFound(format!("Order {id} not found")),
            ManagerError::AttestationRejected(errors) => {
                AppError::Unprocessable(errors.join("; "))
            }
            ManagerError::ServiceUnavailable(msg) => AppError::ServiceUnavailable(msg),
            ManagerError::Storage(e) => AppError::Storage(e.to_string()),
            ManagerError::Internal(msg) => AppError::Internal(msg),
        }
    }
}
