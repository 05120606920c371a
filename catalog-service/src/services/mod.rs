pub mod catalog;
pub mod database;
pub mod filter;
pub mod memory;
pub mod metrics;
pub mod seed;
pub mod store;

pub use catalog::{Diagnostics, SeedOutcome};
pub use database::CatalogDb;
pub use filter::ProductFilter;
pub use memory::MemoryCatalogStore;
pub use metrics::{get_metrics, init_metrics, record_products_returned, record_seed};
pub use store::CatalogStore;
