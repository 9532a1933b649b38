//! OrdersManager - submission pipeline and staff actions
//!
//! This module handles:
//! - Order submission: availability check, validation, cover generation,
//!   merge, pricing, insert
//! - Staff actions on the head of the queue: download, complete, reject,
//!   delete
//! - Payment screenshot attestation
//!
//! # Submission Flow
//!
//! ```text
//! submit(request)
//!     ├─ 1. Service availability check
//!     ├─ 2. Settings check (copies range)
//!     ├─ 3. Per-file PDF validation (parse, page count, limits)
//!     ├─ 4. Cover page generation
//!     ├─ 5. Merge: cover + documents, in submission order
//!     ├─ 6. Cost estimation (fixed from here on)
//!     └─ 7. Insert into the store (position assigned transactionally)
//! ```
//!
//! Steps 3-6 are pure CPU work over in-memory buffers; the store is only
//! entered for the final insert, so no PDF work ever runs inside a write
//! transaction. `submit` is synchronous and intended to be called through
//! `spawn_blocking`.

mod error;
pub use error::*;

use super::store::OrderStore;
use crate::core::Config;
use crate::documents::{self, cover};
use crate::payment::{PaymentVerifier, TextExtractor};
use crate::pricing::{self, PriceTable};
use crate::services::ServiceStatusService;
use chrono::Local;
use shared::{Order, OrderSummary, PrintSettings, QueueStats, VerificationOutcome};
use std::sync::Arc;

/// A validated submission, ready for the pipeline.
///
/// Text fields are expected to be sanitized by the caller; settings are
/// already parsed. Files carry their original names for the record.
#[derive(Debug)]
pub struct SubmitRequest {
    pub student_name: String,
    pub student_id: String,
    pub instructions: String,
    pub settings: PrintSettings,
    pub transaction_id: Option<String>,
    /// (original filename, PDF bytes) in submission order
    pub files: Vec<(String, Vec<u8>)>,
}

/// Use-case layer over the store
#[derive(Clone)]
pub struct OrdersManager {
    store: OrderStore,
    status: ServiceStatusService,
    extractor: Arc<dyn TextExtractor>,
    verifier: PaymentVerifier,
    prices: PriceTable,
    max_copies: u32,
    max_pages_per_document: usize,
}

impl std::fmt::Debug for OrdersManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrdersManager")
            .field("store", &"<OrderStore>")
            .field("extractor", &"<TextExtractor>")
            .finish()
    }
}

impl OrdersManager {
    pub fn new(
        store: OrderStore,
        status: ServiceStatusService,
        extractor: Arc<dyn TextExtractor>,
        config: &Config,
    ) -> Self {
        Self {
            store,
            status,
            extractor,
            verifier: PaymentVerifier::new(config.recipient.clone(), config.min_ocr_text_length),
            prices: config.prices.clone(),
            max_copies: config.max_copies,
            max_pages_per_document: config.max_pages_per_document,
        }
    }

    // ========== Submission ==========

    /// Run the full submission pipeline and insert the resulting order.
    ///
    /// Cost, page count and artifact are fixed at this point and never
    /// recomputed by later mutations.
    pub fn submit(&self, request: SubmitRequest) -> ManagerResult<Order> {
        let status = self.status.status();
        if !status.is_active {
            let message = if status.message.is_empty() {
                "Service is currently unavailable".to_string()
            } else {
                status.message
            };
            return Err(ManagerError::ServiceUnavailable(message));
        }

        let copies = request.settings.copies;
        if copies == 0 || copies > self.max_copies {
            return Err(ManagerError::InvalidSettings(format!(
                "copies must be between 1 and {} (got {copies})",
                self.max_copies
            )));
        }
        if request.files.is_empty() {
            return Err(ManagerError::InvalidDocument("No files uploaded".to_string()));
        }

        let mut filenames = Vec::with_capacity(request.files.len());
        let mut contents = Vec::with_capacity(request.files.len());
        for (filename, bytes) in request.files {
            documents::validate(&bytes, self.max_pages_per_document)
                .map_err(|e| ManagerError::InvalidDocument(format!("{filename}: {e}")))?;
            filenames.push(filename);
            contents.push(bytes);
        }

        let cover = cover::generate(&request.student_name, &request.student_id, Local::now())?;
        let (artifact, total_pages) = documents::assemble(cover, contents)?;

        let cost = pricing::estimate_cost(&self.prices, &request.settings, total_pages);

        let mut order = Order::new(
            request.student_name,
            request.student_id,
            request.instructions,
            request.settings,
            total_pages,
            pricing::to_f64(cost),
            artifact.len() as u64,
            filenames,
            request.transaction_id,
        );
        self.store.create(&mut order, &artifact)?;
        Ok(order)
    }

    // ========== Queue views ==========

    pub fn get(&self, order_id: &str) -> ManagerResult<Order> {
        self.store
            .get(order_id)?
            .ok_or_else(|| ManagerError::NotFound(order_id.to_string()))
    }

    /// List orders with their head-of-queue flag.
    pub fn list(&self, pending_only: bool) -> ManagerResult<Vec<OrderSummary>> {
        let head_id = self.store.head()?.map(|h| h.id);
        let orders = if pending_only {
            self.store.list_pending()?
        } else {
            self.store.list_all()?
        };

        Ok(orders
            .into_iter()
            .map(|order| {
                let is_first = head_id.as_deref() == Some(order.id.as_str());
                OrderSummary { order, is_first }
            })
            .collect())
    }

    /// Annotate a single order with its head-of-queue flag.
    pub fn summarize(&self, order: Order) -> ManagerResult<OrderSummary> {
        let is_first = self.store.head()?.is_some_and(|head| head.id == order.id);
        Ok(OrderSummary { order, is_first })
    }

    pub fn stats(&self) -> ManagerResult<QueueStats> {
        Ok(self.store.stats()?)
    }

    // ========== Head-only staff actions ==========

    /// Fetch the merged artifact for printing. Only the head of the queue
    /// may be downloaded; this is a read, so the check is advisory rather
    /// than transactional.
    pub fn download(&self, order_id: &str) -> ManagerResult<(Order, Vec<u8>)> {
        let order = self.get(order_id)?;
        let head = self.store.head()?;
        if head.as_ref().map(|h| h.id.as_str()) != Some(order_id) {
            return Err(ManagerError::NotHeadOfQueue(
                "Can only download the first order in queue".to_string(),
            ));
        }

        let artifact = self
            .store
            .load_artifact(order_id)?
            .ok_or_else(|| ManagerError::NotFound(order_id.to_string()))?;
        Ok((order, artifact))
    }

    pub fn complete(&self, order_id: &str) -> ManagerResult<Order> {
        Ok(self.store.complete(order_id)?)
    }

    /// Mark the head as not completed (student never showed up, payment
    /// dispute). The record is retained under `cancelled`.
    pub fn reject(&self, order_id: &str) -> ManagerResult<Order> {
        Ok(self.store.cancel(order_id)?)
    }

    pub fn remove(&self, order_id: &str) -> ManagerResult<Order> {
        Ok(self.store.remove(order_id)?)
    }

    // ========== Payment attestation ==========

    /// OCR the screenshot and check the extracted text against the
    /// configured recipient. Rejection carries the failed checks.
    pub async fn verify_payment(&self, image: &[u8]) -> ManagerResult<VerificationOutcome> {
        let text = self.extractor.extract_text(image).await?;
        tracing::debug!(text_len = text.len(), "Screenshot text extracted");

        let outcome = self.verifier.verify(&text);
        if outcome.accepted {
            Ok(outcome)
        } else {
            Err(ManagerError::AttestationRejected(outcome.errors))
        }
    }
}

#[cfg(test)]
mod tests;
