//! Payment attestation result

use serde::{Deserialize, Serialize};

/// Outcome of verifying a UPI payment screenshot's extracted text.
///
/// `transaction_id` is only populated when the attestation is accepted;
/// a lexically-found reference is withheld on rejection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerificationOutcome {
    pub accepted: bool,
    pub transaction_id: Option<String>,
    pub errors: Vec<String>,
}

impl VerificationOutcome {
    pub fn accepted(transaction_id: String) -> Self {
        Self {
            accepted: true,
            transaction_id: Some(transaction_id),
            errors: Vec::new(),
        }
    }

    pub fn rejected(errors: Vec<String>) -> Self {
        Self {
            accepted: false,
            transaction_id: None,
            errors,
        }
    }
}
