//! Attestation checks over OCR-extracted text
//!
//! Three checks run against the extracted text:
//!
//! 1. A transaction reference, tried against an ordered rule table covering
//!    the label vocabularies of the common UPI apps; first match wins. A
//!    bare 12-digit number is accepted as a fallback only when the text
//!    also contains payment language, which keeps random numeric strings in
//!    unrelated screenshots from passing.
//! 2. The recipient's name: any configured spelling variant as a
//!    case-insensitive substring.
//! 3. The recipient's phone number: digit-sequence containment after
//!    stripping every non-digit from both sides, tried bare and with the
//!    91 / +91 country prefixes.
//!
//! Accepted iff a reference was found AND at least one identity check
//! passed. On rejection the reference is withheld even when one was
//! lexically present.

use once_cell::sync::Lazy;
use regex::Regex;
use shared::VerificationOutcome;

/// Ordered reference-extraction rules; tried top to bottom, first match wins.
static REFERENCE_RULES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // UPI Reference Number (12 digits typical)
        r"(?i)UPI\s*(?:Ref(?:erence)?\.?\s*(?:No\.?|Number)?|ID)\s*[:\-]?\s*(\d{10,14})",
        // UTR Number (typically 12-22 alphanumeric)
        r"(?i)UTR\s*(?:No\.?|Number)?\s*[:\-]?\s*([A-Z0-9]{10,22})",
        // Transaction ID
        r"(?i)(?:Transaction\s*ID|Txn\s*ID)\s*[:\-]?\s*([A-Z0-9]{8,22})",
        // Reference Number
        r"(?i)Ref(?:erence)?\s*(?:No\.?|Number|ID)?\s*[:\-]?\s*(\d{10,14})",
        // Google Pay specific format
        r"(?i)UPI\s*transaction\s*ID\s*[:\-]?\s*([A-Z0-9]{10,22})",
        // Generic id after order/payment keywords
        r"(?i)(?:Order\s*ID|Payment\s*ID)\s*[:\-]?\s*([A-Z0-9]{8,22})",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("reference rule regex"))
    .collect()
});

/// Fallback: a standalone 12-digit number, gated on payment keywords.
static STANDALONE_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{12})\b").expect("standalone reference regex"));

/// Payment-affirmation keywords required for the fallback rule
const PAYMENT_KEYWORDS: &[&str] = &[
    "paid",
    "payment",
    "successful",
    "completed",
    "transferred",
    "sent",
];

/// Configured identity facts of the shop's payment recipient
#[derive(Debug, Clone)]
pub struct RecipientFacts {
    /// Primary name plus display variants seen across UPI apps
    pub name_variants: Vec<String>,
    /// Phone number linked to the UPI account (10 digits, prefix optional)
    pub phone: String,
    /// UPI id shown to students on the payment page
    pub upi_id: String,
}

/// Pure attestation checker over extracted text
#[derive(Debug, Clone)]
pub struct PaymentVerifier {
    recipient: RecipientFacts,
    min_text_len: usize,
}

fn digits_only(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

impl PaymentVerifier {
    pub fn new(recipient: RecipientFacts, min_text_len: usize) -> Self {
        Self {
            recipient,
            min_text_len,
        }
    }

    /// Extract a transaction reference from the text, if any rule matches.
    fn extract_reference(&self, normalized: &str) -> Option<String> {
        for rule in REFERENCE_RULES.iter() {
            if let Some(captures) = rule.captures(normalized) {
                return captures.get(1).map(|m| m.as_str().trim().to_string());
            }
        }

        // Fallback only fires alongside payment language
        let lowered = normalized.to_lowercase();
        if PAYMENT_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
            return STANDALONE_REFERENCE
                .captures(normalized)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string());
        }

        None
    }

    /// Whether any configured name variant appears in the text.
    fn name_matches(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.recipient
            .name_variants
            .iter()
            .any(|variant| lowered.contains(&variant.to_lowercase()))
    }

    /// Whether the recipient's phone digits appear in the text, tolerating
    /// OCR noise in punctuation and spacing.
    fn phone_matches(&self, text: &str) -> bool {
        let phone = digits_only(&self.recipient.phone);
        if phone.is_empty() {
            return false;
        }
        let text_digits = digits_only(text);

        let candidates = [phone.clone(), format!("91{phone}")];
        if candidates.iter().any(|c| text_digits.contains(c.as_str())) {
            return true;
        }

        // Configured number may itself carry a country code
        if phone.len() >= 10 {
            let last_10 = &phone[phone.len() - 10..];
            return text_digits.contains(last_10);
        }
        false
    }

    /// Run all checks and decide.
    pub fn verify(&self, text: &str) -> VerificationOutcome {
        if text.trim().chars().count() < self.min_text_len {
            return VerificationOutcome::rejected(vec![
                "Could not extract sufficient text from image. Please upload a clear screenshot."
                    .to_string(),
            ]);
        }

        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");

        let mut errors = Vec::new();

        let reference = self.extract_reference(&normalized);
        if reference.is_none() {
            errors.push("Transaction ID / UPI Reference Number not found in screenshot".to_string());
        }

        let name_ok = self.name_matches(&normalized);
        if !name_ok {
            errors.push(format!(
                "Receiver name '{}' not found in screenshot",
                self.recipient
                    .name_variants
                    .first()
                    .map(String::as_str)
                    .unwrap_or("")
            ));
        }

        let phone_ok = self.phone_matches(&normalized);
        if !phone_ok {
            errors.push("Payment recipient phone number not verified".to_string());
        }

        // A reference alone proves a payment happened somewhere; an identity
        // match alone proves nothing was paid. Both are required.
        match reference {
            Some(reference) if name_ok || phone_ok => VerificationOutcome::accepted(reference),
            _ => VerificationOutcome::rejected(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier() -> PaymentVerifier {
        PaymentVerifier::new(
            RecipientFacts {
                name_variants: vec![
                    "UNMAN CHAUDHURI".to_string(),
                    "Unman  Chaudhuri".to_string(),
                ],
                phone: "9876543210".to_string(),
                upi_id: "shop@upi".to_string(),
            },
            20,
        )
    }

    #[test]
    fn test_accepts_reference_plus_name() {
        let outcome = verifier().verify(
            "Payment to UNMAN CHAUDHURI was successful\nUPI Ref No. 123456789012\nAmount Rs 42",
        );
        assert!(outcome.accepted);
        assert_eq!(outcome.transaction_id.as_deref(), Some("123456789012"));
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_accepts_reference_plus_phone_despite_punctuation() {
        let outcome = verifier().verify(
            "Paid to +91 98765 43210 via PhonePe\nUTR: AXIS12345678\nTransfer completed",
        );
        assert!(outcome.accepted);
        assert_eq!(outcome.transaction_id.as_deref(), Some("AXIS12345678"));
    }

    #[test]
    fn test_rejects_reference_without_identity() {
        // Valid-looking code, but neither name nor phone anywhere
        let outcome = verifier()
            .verify("Transaction ID: ABCD12345678 sent to someone else entirely, 8000000001");
        assert!(!outcome.accepted);
        // Reference is withheld on rejection even though one was found
        assert!(outcome.transaction_id.is_none());
        assert_eq!(outcome.errors.len(), 2);
    }

    #[test]
    fn test_rejects_identity_without_reference() {
        let outcome =
            verifier().verify("Screenshot of a chat mentioning Unman Chaudhuri and nothing else");
        assert!(!outcome.accepted);
        assert!(outcome.transaction_id.is_none());
        assert!(
            outcome
                .errors
                .iter()
                .any(|e| e.contains("Transaction ID / UPI Reference"))
        );
    }

    #[test]
    fn test_fallback_needs_payment_keyword() {
        // Bare 12-digit number with no payment language: not a reference
        let no_keyword = verifier().verify("Call me at 987654321099 about UNMAN CHAUDHURI order");
        assert!(!no_keyword.accepted);

        // Same number with payment language: fallback fires
        let with_keyword =
            verifier().verify("Payment successful 987654321099 received by UNMAN CHAUDHURI");
        assert!(with_keyword.accepted);
        assert_eq!(
            with_keyword.transaction_id.as_deref(),
            Some("987654321099")
        );
    }

    #[test]
    fn test_fails_closed_on_short_text() {
        let outcome = verifier().verify("  too short  ");
        assert!(!outcome.accepted);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].contains("sufficient text"));
    }

    #[test]
    fn test_rule_priority_prefers_upi_ref_over_fallback() {
        let outcome = verifier().verify(
            "UPI Ref No: 111122223333 paid, also mentions 999988887777 to UNMAN CHAUDHURI",
        );
        assert!(outcome.accepted);
        assert_eq!(outcome.transaction_id.as_deref(), Some("111122223333"));
    }

    #[test]
    fn test_name_match_is_case_insensitive() {
        let outcome = verifier().verify("paid to unman chaudhuri successfully, Txn ID: AB12345678");
        assert!(outcome.accepted);
    }
}
