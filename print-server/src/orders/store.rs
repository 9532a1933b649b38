//! redb-based storage layer for the order queue
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `orders` | `order_id` | JSON-serialized `Order` | Order records |
//! | `artifacts` | `order_id` | raw bytes | Merged PDF per order |
//!
//! # Queue semantics
//!
//! `queue_position` is assigned inside the insert transaction as
//! max(pending)+1, so concurrent creates can never collide (redb admits a
//! single writer at a time). Positions are never reused or renumbered:
//! after 1,2,3 and completing 1, the next order gets 4, not 1. The
//! position is a tail ticket, not a dense rank.
//!
//! Every exit from `pending` (complete, cancel, remove) re-reads the head
//! inside its own write transaction before mutating, so a stale head id
//! observed by a caller can never modify a non-head order.
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate`; the file is always in a
//! consistent state even across power loss, which matters for a shop
//! counter machine that gets switched off at night.

use chrono::{Local, Utc};
use redb::{
    Database, ReadableDatabase, ReadableTable, TableDefinition,
};
use shared::{Order, OrderStatus, QueueStats};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table for order records: key = order_id, value = JSON-serialized Order
const ORDERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("orders");

/// Table for merged artifacts: key = order_id, value = raw PDF bytes
const ARTIFACTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("artifacts");

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("{0}")]
    NotHeadOfQueue(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Order queue store backed by redb
#[derive(Clone)]
pub struct OrderStore {
    db: Arc<Database>,
}

impl OrderStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;
        let store = Self { db: Arc::new(db) };
        store.init_tables()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        let store = Self { db: Arc::new(db) };
        store.init_tables()?;
        Ok(store)
    }

    fn init_tables(&self) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(ARTIFACTS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    // ========== Create ==========

    /// Insert a new pending order and its artifact, assigning the queue
    /// position inside the transaction.
    ///
    /// Position = max(pending)+1, or 1 for an empty queue. Basing this on
    /// the current pending set (not a global counter) reproduces the
    /// shop's ticket numbering: positions are unique and increasing but
    /// not necessarily contiguous after completions.
    pub fn create(&self, order: &mut Order, artifact: &[u8]) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut orders = write_txn.open_table(ORDERS_TABLE)?;

            let mut max_pending = 0u64;
            for entry in orders.iter()? {
                let (_, value) = entry?;
                let existing: Order = serde_json::from_slice(value.value())?;
                if existing.is_pending() {
                    max_pending = max_pending.max(existing.queue_position);
                }
            }
            order.queue_position = max_pending + 1;

            let record = serde_json::to_vec(&*order)?;
            orders.insert(order.id.as_str(), record.as_slice())?;

            let mut artifacts = write_txn.open_table(ARTIFACTS_TABLE)?;
            artifacts.insert(order.id.as_str(), artifact)?;
        }
        write_txn.commit()?;

        tracing::info!(
            order_id = %order.id,
            queue_position = order.queue_position,
            total_pages = order.total_pages,
            file_size = order.file_size,
            "Order created"
        );
        Ok(())
    }

    // ========== Reads ==========

    /// Get an order by id
    pub fn get(&self, order_id: &str) -> StoreResult<Option<Order>> {
        let read_txn = self.db.begin_read()?;
        let orders = read_txn.open_table(ORDERS_TABLE)?;
        match orders.get(order_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// The pending order with the lowest queue position, if any
    pub fn head(&self) -> StoreResult<Option<Order>> {
        let pending = self.list_pending()?;
        Ok(pending.into_iter().next())
    }

    /// All pending orders, queue position ascending
    pub fn list_pending(&self) -> StoreResult<Vec<Order>> {
        let mut pending: Vec<Order> = self
            .scan()?
            .into_iter()
            .filter(Order::is_pending)
            .collect();
        pending.sort_by_key(|o| o.queue_position);
        Ok(pending)
    }

    /// All orders, newest first
    pub fn list_all(&self) -> StoreResult<Vec<Order>> {
        let mut orders = self.scan()?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Load the merged artifact for an order
    pub fn load_artifact(&self, order_id: &str) -> StoreResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let artifacts = read_txn.open_table(ARTIFACTS_TABLE)?;
        Ok(artifacts.get(order_id)?.map(|v| v.value().to_vec()))
    }

    /// Queue statistics for the dashboard
    pub fn stats(&self) -> StoreResult<QueueStats> {
        let today = Local::now().date_naive();
        let mut pending_count = 0u64;
        let mut completed_today = 0u64;

        for order in self.scan()? {
            match order.status {
                OrderStatus::Pending => pending_count += 1,
                OrderStatus::Completed => {
                    if order
                        .completed_at
                        .is_some_and(|t| t.with_timezone(&Local).date_naive() == today)
                    {
                        completed_today += 1;
                    }
                }
                OrderStatus::Cancelled => {}
            }
        }

        Ok(QueueStats {
            pending_count,
            completed_today,
        })
    }

    fn scan(&self) -> StoreResult<Vec<Order>> {
        let read_txn = self.db.begin_read()?;
        let orders = read_txn.open_table(ORDERS_TABLE)?;
        let mut result = Vec::new();
        for entry in orders.iter()? {
            let (_, value) = entry?;
            result.push(serde_json::from_slice(value.value())?);
        }
        Ok(result)
    }

    // ========== Head-only mutations ==========

    /// Mark the head order as completed. The entry is retained for
    /// history and daily statistics.
    pub fn complete(&self, order_id: &str) -> StoreResult<Order> {
        self.mutate_head(order_id, "complete", |order| {
            order.status = OrderStatus::Completed;
            order.completed_at = Some(Utc::now());
        })
    }

    /// Mark the head order as cancelled. The entry is retained.
    pub fn cancel(&self, order_id: &str) -> StoreResult<Order> {
        self.mutate_head(order_id, "cancel", |order| {
            order.status = OrderStatus::Cancelled;
        })
    }

    /// Physically erase the head order and its artifact.
    pub fn remove(&self, order_id: &str) -> StoreResult<Order> {
        let write_txn = self.db.begin_write()?;
        let removed;
        {
            let mut orders = write_txn.open_table(ORDERS_TABLE)?;
            let target = Self::check_head(&orders, order_id, "delete")?;
            orders.remove(order_id)?;
            let mut artifacts = write_txn.open_table(ARTIFACTS_TABLE)?;
            artifacts.remove(order_id)?;
            removed = target;
        }
        write_txn.commit()?;

        tracing::info!(order_id = %order_id, "Order deleted");
        Ok(removed)
    }

    /// Apply a status change to `order_id`, but only if it is currently
    /// the head of the queue. Head check and mutation share one write
    /// transaction, so two racing calls cannot both succeed.
    fn mutate_head(
        &self,
        order_id: &str,
        action: &str,
        apply: impl FnOnce(&mut Order),
    ) -> StoreResult<Order> {
        let write_txn = self.db.begin_write()?;
        let updated;
        {
            let mut orders = write_txn.open_table(ORDERS_TABLE)?;
            let mut target = Self::check_head(&orders, order_id, action)?;

            apply(&mut target);
            let record = serde_json::to_vec(&target)?;
            orders.insert(order_id, record.as_slice())?;
            updated = target;
        }
        write_txn.commit()?;

        tracing::info!(order_id = %order_id, action = %action, "Order updated");
        Ok(updated)
    }

    /// Within a write transaction: fetch `order_id` and verify it is the
    /// pending entry with the minimum queue position.
    fn check_head(
        orders: &impl ReadableTable<&'static str, &'static [u8]>,
        order_id: &str,
        action: &str,
    ) -> StoreResult<Order> {
        let target = match orders.get(order_id)? {
            Some(value) => serde_json::from_slice::<Order>(value.value())?,
            None => return Err(StoreError::OrderNotFound(order_id.to_string())),
        };

        let mut head: Option<(u64, String)> = None;
        for entry in orders.iter()? {
            let (_, value) = entry?;
            let order: Order = serde_json::from_slice(value.value())?;
            if order.is_pending()
                && head
                    .as_ref()
                    .is_none_or(|(pos, _)| order.queue_position < *pos)
            {
                head = Some((order.queue_position, order.id));
            }
        }

        match head {
            Some((_, head_id)) if head_id == target.id => Ok(target),
            _ => Err(StoreError::NotHeadOfQueue(format!(
                "Can only {action} the first order in queue"
            ))),
        }
    }
}
