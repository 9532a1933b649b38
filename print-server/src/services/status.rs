//! Service availability flag
//!
//! A single in-memory flag guarded by a `RwLock`, mirrored to a JSON file
//! in the work directory so a stop survives a restart. The shop owner
//! flips it from the dashboard; order submission checks it first and
//! rejects with the operator's message while stopped.

use chrono::Utc;
use parking_lot::RwLock;
use shared::ServiceStatus;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File name of the persisted flag inside the work directory
const STATUS_FILE: &str = "service_status.json";

/// Availability flag service
#[derive(Clone)]
pub struct ServiceStatusService {
    inner: Arc<RwLock<ServiceStatus>>,
    /// None in tests: flag lives in memory only
    path: Option<PathBuf>,
}

impl ServiceStatusService {
    /// Load the persisted flag from the work directory, defaulting to
    /// active when the file is missing or unreadable.
    pub fn load(work_dir: impl AsRef<Path>) -> Self {
        let path = work_dir.as_ref().join(STATUS_FILE);
        let status = match std::fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(status) => status,
                Err(e) => {
                    tracing::warn!(error = %e, "Corrupt service status file, resetting to active");
                    ServiceStatus::default()
                }
            },
            Err(_) => ServiceStatus::default(),
        };

        tracing::info!(is_active = status.is_active, "Service status loaded");
        Self {
            inner: Arc::new(RwLock::new(status)),
            path: Some(path),
        }
    }

    /// In-memory flag with no file backing (for testing)
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ServiceStatus::default())),
            path: None,
        }
    }

    pub fn status(&self) -> ServiceStatus {
        self.inner.read().clone()
    }

    pub fn is_active(&self) -> bool {
        self.inner.read().is_active
    }

    /// Stop accepting new orders, recording who stopped it and why.
    pub fn stop(&self, message: String, stopped_by: String) -> ServiceStatus {
        let status = ServiceStatus {
            is_active: false,
            message,
            stopped_at: Some(Utc::now()),
            stopped_by: Some(stopped_by),
        };
        *self.inner.write() = status.clone();
        self.persist(&status);
        tracing::warn!(stopped_by = ?status.stopped_by, "Service stopped");
        status
    }

    /// Resume accepting orders, clearing the stop record.
    pub fn start(&self) -> ServiceStatus {
        let status = ServiceStatus::default();
        *self.inner.write() = status.clone();
        self.persist(&status);
        tracing::info!("Service resumed");
        status
    }

    fn persist(&self, status: &ServiceStatus) {
        let Some(path) = &self.path else { return };
        match serde_json::to_vec_pretty(status) {
            Ok(bytes) => {
                if let Err(e) = std::fs::write(path, bytes) {
                    tracing::error!(error = %e, "Failed to persist service status");
                }
            }
            Err(e) => tracing::error!(error = %e, "Failed to serialize service status"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_active() {
        let service = ServiceStatusService::in_memory();
        assert!(service.is_active());
        assert_eq!(service.status().message, "");
    }

    #[test]
    fn test_stop_records_message_and_operator() {
        let service = ServiceStatusService::in_memory();
        let status = service.stop("Printer out of toner".to_string(), "owner".to_string());

        assert!(!status.is_active);
        assert!(!service.is_active());
        assert_eq!(status.message, "Printer out of toner");
        assert_eq!(status.stopped_by.as_deref(), Some("owner"));
        assert!(status.stopped_at.is_some());
    }

    #[test]
    fn test_start_clears_stop_record() {
        let service = ServiceStatusService::in_memory();
        service.stop("closed".to_string(), "owner".to_string());

        let status = service.start();
        assert!(status.is_active);
        assert!(status.stopped_at.is_none());
        assert!(status.stopped_by.is_none());
        assert!(service.is_active());
    }

    #[test]
    fn test_flag_survives_reload_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let service = ServiceStatusService::load(dir.path());
        service.stop("back at 5pm".to_string(), "owner".to_string());

        let reloaded = ServiceStatusService::load(dir.path());
        assert!(!reloaded.is_active());
        assert_eq!(reloaded.status().message, "back at 5pm");
    }

    #[test]
    fn test_missing_file_means_active() {
        let dir = tempfile::tempdir().unwrap();
        let service = ServiceStatusService::load(dir.path());
        assert!(service.is_active());
    }
}
