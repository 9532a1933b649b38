//! Orders module - queue store and orchestration
//!
//! # Structure
//!
//! - [`store`] - redb-backed order records, artifacts and queue positions
//! - [`manager`] - use-case layer: submission pipeline and staff actions
//!
//! The store is the single source of truth for queue order. Every
//! state-mutating operation runs inside one redb write transaction, which
//! serializes writers and keeps "read who is head, then act" atomic.

pub mod manager;
pub mod store;

pub use manager::{ManagerError, ManagerResult, OrdersManager, SubmitRequest};
pub use store::{OrderStore, StoreError, StoreResult};
