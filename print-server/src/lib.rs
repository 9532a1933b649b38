//! Print Order Service - single-shop print queue server
//!
//! # Architecture overview
//!
//! - **Orders** (`orders`): redb-backed FIFO queue with head-only
//!   mutation, plus the submission pipeline
//! - **Pricing** (`pricing`): tiered rate table and cost estimation
//! - **Documents** (`documents`): cover page generation and PDF merge
//! - **Payment** (`payment`): UPI screenshot attestation via OCR
//! - **HTTP API** (`api`): thin axum surface over the manager
//!
//! # Module structure
//!
//! ```text
//! print-server/src/
//! ├── core/          # config, state, server
//! ├── orders/        # queue store + orchestrator
//! ├── pricing/       # rate table, cost estimation
//! ├── documents/     # cover page, merge, validation
//! ├── payment/       # OCR extraction, attestation checks
//! ├── services/      # availability flag
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # errors, logging, input validation
//! ```

pub mod api;
pub mod core;
pub mod documents;
pub mod orders;
pub mod payment;
pub mod pricing;
pub mod services;
pub mod utils;

// Re-export common types
pub use crate::core::{Config, Server, ServerState};
pub use orders::{OrderStore, OrdersManager};
pub use pricing::PriceTable;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    ____       _       __     ____
   / __ \_____(_)___  / /_   / __ \__  _____  __  _____
  / /_/ / ___/ / __ \/ __/  / / / / / / / _ \/ / / / _ \
 / ____/ /  / / / / / /_   / /_/ / /_/ /  __/ /_/ /  __/
/_/   /_/  /_/_/ /_/\__/   \___\_\__,_/\___/\__,_/\___/
    "#
    );
}

/// Set up the process environment: dotenv, work directory and logging.
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/print-server".into());
    std::fs::create_dir_all(&work_dir)?;

    let log_dir = format!("{work_dir}/logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_level = std::env::var("LOG_LEVEL").ok();
    init_logger_with_file(log_level.as_deref(), Some(&log_dir));

    Ok(())
}
