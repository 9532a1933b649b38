//! Long-lived services shared across handlers

pub mod status;

pub use status::ServiceStatusService;
