//! Domain models

pub mod order;
pub mod payment;
pub mod service_status;
