//! HTTP handlers for catalog-service.

pub mod catalog;
pub mod health;
pub mod products;

pub use catalog::{diagnostics, not_found, root, seed};
pub use health::{health_check, metrics_endpoint, readiness_check};
pub use products::{featured_products, list_products};
