use crate::models::{Product, ProductDocument};
use crate::services::filter::ProductFilter;
use crate::services::store::{CatalogStore, PRODUCT_COLLECTION};
use async_trait::async_trait;
use service_core::error::AppError;
use tokio::sync::RwLock;

/// In-process catalog store evaluating [`ProductFilter`] directly.
///
/// Selected with a `memory://` database URL; also backs the HTTP test suite.
/// A store built with [`MemoryCatalogStore::failing`] rejects every operation.
pub struct MemoryCatalogStore {
    database: String,
    documents: RwLock<Vec<ProductDocument>>,
    failure: Option<String>,
}

impl MemoryCatalogStore {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            documents: RwLock::new(Vec::new()),
            failure: None,
        }
    }

    pub fn with_products(database: impl Into<String>, products: Vec<Product>) -> Self {
        Self {
            documents: RwLock::new(products.into_iter().map(ProductDocument::new).collect()),
            ..Self::new(database)
        }
    }

    pub fn failing(database: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new(database)
        }
    }

    fn check(&self) -> Result<(), AppError> {
        match &self.failure {
            Some(message) => Err(AppError::DatabaseError(anyhow::anyhow!(message.clone()))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    fn database_name(&self) -> &str {
        &self.database
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check()
    }

    async fn find_products(
        &self,
        filter: &ProductFilter,
        limit: Option<i64>,
    ) -> Result<Vec<Product>, AppError> {
        self.check()?;
        let limit = limit
            .filter(|l| *l > 0)
            .map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));

        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .map(|d| &d.product)
            .filter(|p| filter.matches(p))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count_products(&self) -> Result<u64, AppError> {
        self.check()?;
        Ok(self.documents.read().await.len() as u64)
    }

    async fn insert_products(&self, products: Vec<Product>) -> Result<usize, AppError> {
        self.check()?;
        let count = products.len();
        self.documents
            .write()
            .await
            .extend(products.into_iter().map(ProductDocument::new));
        Ok(count)
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, AppError> {
        self.check()?;
        // Like MongoDB, a collection only exists once something was written to it.
        if self.documents.read().await.is_empty() {
            Ok(Vec::new())
        } else {
            Ok(vec![PRODUCT_COLLECTION.to_string()])
        }
    }
}
