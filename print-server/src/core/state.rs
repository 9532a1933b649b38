use std::sync::Arc;

use crate::core::Config;
use crate::orders::{OrderStore, OrdersManager};
use crate::payment::{TesseractExtractor, TextExtractor};
use crate::services::ServiceStatusService;

/// Server state - shared handles for all handlers
///
/// Cloning is shallow; every service is reference counted internally.
///
/// | Field | Purpose |
/// |-------|---------|
/// | config | immutable configuration |
/// | orders | submission pipeline and queue actions |
/// | status | service availability flag |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub orders: OrdersManager,
    pub status: ServiceStatusService,
}

impl ServerState {
    /// Open the store under the work directory and wire up the services.
    pub fn initialize(config: &Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;

        let store = OrderStore::open(config.database_path())?;
        let status = ServiceStatusService::load(&config.work_dir);
        let extractor: Arc<dyn TextExtractor> = Arc::new(TesseractExtractor);
        let orders = OrdersManager::new(store, status.clone(), extractor, config);

        tracing::info!(
            work_dir = %config.work_dir,
            database = %config.database_path().display(),
            "Server state initialized"
        );

        Ok(Self {
            config: config.clone(),
            orders,
            status,
        })
    }
}
