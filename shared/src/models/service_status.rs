//! Service availability flag

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether the shop is accepting new orders, with an operator message
/// shown to students while the service is stopped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceStatus {
    pub is_active: bool,
    pub message: String,
    pub stopped_at: Option<DateTime<Utc>>,
    pub stopped_by: Option<String>,
}

impl Default for ServiceStatus {
    fn default() -> Self {
        Self {
            is_active: true,
            message: String::new(),
            stopped_at: None,
            stopped_by: None,
        }
    }
}
