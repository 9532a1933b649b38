//! Payment module - UPI screenshot attestation
//!
//! # Structure
//!
//! - [`extractor`] - OCR text extraction (injected collaborator)
//! - [`verification`] - pure checks over the extracted text
//!
//! Only the transaction reference is ever stored; screenshots are
//! processed in memory and discarded.

pub mod extractor;
pub mod verification;

pub use extractor::{ExtractError, TesseractExtractor, TextExtractor};
pub use verification::{PaymentVerifier, RecipientFacts};
