use crate::models::{Product, ProductDocument};
use crate::services::filter::ProductFilter;
use crate::services::store::{CatalogStore, PRODUCT_COLLECTION};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, from_document, Document},
    options::{FindOptions, IndexOptions},
    Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;
use validator::Validate;

#[derive(Clone)]
pub struct CatalogDb {
    client: MongoClient,
    db: Database,
}

impl CatalogDb {
    /// Build a client for `uri`.
    ///
    /// The driver connects lazily, so an unreachable server only surfaces on
    /// the first operation.
    pub async fn connect(uri: &str, database: Option<&str>) -> Result<Self, AppError> {
        tracing::info!("Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;
        let db = match database {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
        };
        tracing::info!(database = %db.name(), "MongoDB client ready");
        Ok(Self { client, db })
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for catalog-service");

        let products = self.documents();

        for (field, name) in [
            ("category", "category_idx"),
            ("featured", "featured_idx"),
            ("price", "price_idx"),
        ] {
            let mut keys = Document::new();
            keys.insert(field, 1);
            let index = IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().name(name.to_string()).build())
                .build();

            products.create_index(index, None).await.map_err(|e| {
                tracing::error!("Failed to create {} index: {}", field, e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;
        }

        tracing::info!("Successfully created all MongoDB indexes");
        Ok(())
    }

    fn documents(&self) -> Collection<Document> {
        self.db.collection(PRODUCT_COLLECTION)
    }

    fn products(&self) -> Collection<ProductDocument> {
        self.db.collection(PRODUCT_COLLECTION)
    }
}

/// Database used when neither `DATABASE_NAME` nor the URI names one.
pub const DEFAULT_DATABASE: &str = "marketplace";

/// Strip store identity and coerce a raw document into a validated [`Product`].
pub fn coerce_product(mut document: Document) -> Result<Product, AppError> {
    document.remove("_id");
    let product: Product = from_document(document).map_err(|e| {
        tracing::error!("Malformed product document: {}", e);
        AppError::DatabaseError(anyhow::anyhow!("Malformed product document: {}", e))
    })?;
    product.validate().map_err(|e| {
        tracing::error!("Invalid product document: {}", e);
        AppError::DatabaseError(anyhow::anyhow!("Invalid product document: {}", e))
    })?;
    Ok(product)
}

#[async_trait]
impl CatalogStore for CatalogDb {
    fn database_name(&self) -> &str {
        self.db.name()
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(())
    }

    async fn find_products(
        &self,
        filter: &ProductFilter,
        limit: Option<i64>,
    ) -> Result<Vec<Product>, AppError> {
        let find_options = FindOptions::builder().limit(limit).build();

        let cursor = self
            .documents()
            .find(filter.to_document(), find_options)
            .await
            .map_err(|e| {
                tracing::error!("Failed to query products: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;

        let documents: Vec<Document> = cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to collect products: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;

        documents.into_iter().map(coerce_product).collect()
    }

    async fn count_products(&self) -> Result<u64, AppError> {
        self.documents()
            .count_documents(doc! {}, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count products: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })
    }

    async fn insert_products(&self, products: Vec<Product>) -> Result<usize, AppError> {
        if products.is_empty() {
            return Ok(0);
        }

        let documents: Vec<ProductDocument> =
            products.into_iter().map(ProductDocument::new).collect();

        let result = self
            .products()
            .insert_many(documents, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert products: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;

        Ok(result.inserted_ids.len())
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, AppError> {
        self.db.list_collection_names(None).await.map_err(|e| {
            tracing::error!("Failed to list collections: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_coerce_product_drops_id() {
        let document = doc! {
            "_id": ObjectId::new(),
            "title": "Gentleman Grooming Kit",
            "description": "Complete shaving and beard care kit.",
            "price": 59.0,
            "category": "men",
            "in_stock": true,
            "image_url": "https://example.com/kit.jpg",
            "brand": "NordCraft",
            "rating": 4.5,
            "tags": ["grooming", "kit"],
            "featured": true,
        };

        let product = coerce_product(document).unwrap();
        assert_eq!(product.category, Category::Men);
        assert_eq!(product.tags, vec!["grooming", "kit"]);
    }

    #[test]
    fn test_coerce_product_rejects_out_of_range_rating() {
        let document = doc! {
            "title": "Broken",
            "description": "Rating too high",
            "price": 10.0,
            "category": "home",
            "rating": 7.5,
        };

        let err = coerce_product(document).unwrap_err();
        assert!(matches!(err, AppError::DatabaseError(_)));
    }

    #[test]
    fn test_coerce_product_rejects_unknown_category() {
        let document = doc! {
            "title": "Toy",
            "description": "Not in the catalog",
            "price": 10.0,
            "category": "toys",
        };

        assert!(coerce_product(document).is_err());
    }
}
