//! Document module - PDF inspection, cover page and merge
//!
//! # Structure
//!
//! - [`cover`] - generated one-page cover document
//! - [`assembler`] - validation, page counting and merge
//!
//! All composition happens in memory; input buffers are consumed and
//! released as soon as their pages have been lifted into the merged
//! document, since submissions may carry hundreds of megabytes.

pub mod assembler;
pub mod cover;

pub use assembler::{assemble, page_count, validate};

use thiserror::Error;

/// Document pipeline errors
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Invalid PDF: {0}")]
    Invalid(String),

    #[error("PDF has no pages")]
    Empty,

    #[error("PDF exceeds maximum of {max} pages (has {actual})")]
    TooManyPages { max: usize, actual: usize },

    #[error("Failed to generate cover page: {0}")]
    Cover(String),

    #[error("Failed to write merged document: {0}")]
    Write(String),
}

pub type DocumentResult<T> = Result<T, DocumentError>;
