//! Pricing module - rate table and cost estimation

pub mod engine;

pub use engine::{PriceTable, estimate_cost, to_f64};
