//! Shared domain models for the print-order queue service
//!
//! Everything that crosses the wire (or the crate boundary) lives here:
//! order records, print settings, payment attestation results and the
//! service availability flag. The server crate owns all behavior.

pub mod models;

pub use models::order::{
    Binding, ColorMode, Order, OrderStatus, OrderSummary, PageSize, PaperType, PrintSettings,
    PrintSides, QueueStats,
};
pub use models::payment::VerificationOutcome;
pub use models::service_status::ServiceStatus;
