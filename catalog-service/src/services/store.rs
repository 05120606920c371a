use crate::models::Product;
use crate::services::filter::ProductFilter;
use async_trait::async_trait;
use service_core::error::AppError;

/// Name of the collection holding catalog products.
pub const PRODUCT_COLLECTION: &str = "product";

/// Accessor for the catalog document store.
///
/// Implementations strip store identity and coerce documents into [`Product`]
/// before returning them.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    fn database_name(&self) -> &str;

    async fn ping(&self) -> Result<(), AppError>;

    /// Return every product matching `filter`, capped at `limit` when given.
    async fn find_products(
        &self,
        filter: &ProductFilter,
        limit: Option<i64>,
    ) -> Result<Vec<Product>, AppError>;

    async fn count_products(&self) -> Result<u64, AppError>;

    /// Insert `products`, returning how many were written.
    async fn insert_products(&self, products: Vec<Product>) -> Result<usize, AppError>;

    async fn list_collection_names(&self) -> Result<Vec<String>, AppError>;
}
