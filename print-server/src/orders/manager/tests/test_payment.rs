//! Payment screenshot attestation through the manager

use super::*;
use crate::payment::extractor::testing::FailingExtractor;

fn manager_seeing(text: &str) -> OrdersManager {
    manager_with_extractor(Arc::new(FixedExtractor(text.to_string())))
}

#[tokio::test]
async fn test_accepted_attestation_carries_reference() {
    let manager = manager_seeing(
        "Payment successful\nPaid to UNMAN CHAUDHURI\nUPI Ref No: 123456789012",
    );

    let outcome = manager.verify_payment(b"fake-image").await.unwrap();
    assert!(outcome.accepted);
    assert_eq!(outcome.transaction_id.as_deref(), Some("123456789012"));
    assert!(outcome.errors.is_empty());
}

#[tokio::test]
async fn test_phone_match_suffices_without_name() {
    let manager =
        manager_seeing("Transferred to +91 98765 43210\nUTR Number: AXI1234567890");

    let outcome = manager.verify_payment(b"fake-image").await.unwrap();
    assert!(outcome.accepted);
    assert_eq!(outcome.transaction_id.as_deref(), Some("AXI1234567890"));
}

#[tokio::test]
async fn test_rejection_lists_failed_checks() {
    // Reference present, but neither name nor phone matches
    let manager = manager_seeing("Payment completed to SOMEONE ELSE\nUPI Ref No: 123456789012");

    match manager.verify_payment(b"fake-image").await {
        Err(ManagerError::AttestationRejected(errors)) => {
            assert!(!errors.is_empty());
            assert!(errors.iter().any(|e| e.contains("name")));
        }
        other => panic!("expected AttestationRejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_short_text_fails_closed() {
    let manager = manager_seeing("blur");

    match manager.verify_payment(b"fake-image").await {
        Err(ManagerError::AttestationRejected(errors)) => {
            assert_eq!(errors.len(), 1);
            assert!(errors[0].contains("clear screenshot"));
        }
        other => panic!("expected AttestationRejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_extractor_failure_is_internal() {
    let manager = manager_with_extractor(Arc::new(FailingExtractor));
    assert!(matches!(
        manager.verify_payment(b"fake-image").await,
        Err(ManagerError::Internal(_))
    ));
}
