//! Catalog operations behind the HTTP routes.

use crate::models::Product;
use crate::services::filter::ProductFilter;
use crate::services::seed::demo_products;
use crate::services::store::CatalogStore;
use serde::Serialize;
use service_core::error::AppError;

/// Maximum number of products returned by the featured listing.
pub const FEATURED_LIMIT: i64 = 6;

/// Maximum number of collection names reported by diagnostics.
pub const MAX_LISTED_COLLECTIONS: usize = 10;

/// Store errors in diagnostics are cut to this many characters.
pub const DIAGNOSTIC_ERROR_CHARS: usize = 50;

pub async fn list_products(
    store: &dyn CatalogStore,
    filter: &ProductFilter,
) -> Result<Vec<Product>, AppError> {
    let products = store.find_products(filter, None).await?;
    tracing::debug!(count = products.len(), "Listed products");
    Ok(products)
}

pub async fn featured_products(store: &dyn CatalogStore) -> Result<Vec<Product>, AppError> {
    store
        .find_products(&ProductFilter::featured_only(), Some(FEATURED_LIMIT))
        .await
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SeedOutcome {
    pub message: String,
    pub count: u64,
}

impl SeedOutcome {
    pub fn was_seeded(&self) -> bool {
        self.message == SEEDED
    }
}

const SEEDED: &str = "Catalog seeded";
const ALREADY_SEEDED: &str = "Catalog already seeded";

/// Insert the demo catalog into an empty collection.
///
/// Two concurrent calls against an empty collection may both insert.
pub async fn seed_catalog(store: &dyn CatalogStore) -> Result<SeedOutcome, AppError> {
    let count = store.count_products().await?;
    if count > 0 {
        tracing::info!(count, "Catalog already seeded, skipping");
        return Ok(SeedOutcome {
            message: ALREADY_SEEDED.to_string(),
            count,
        });
    }

    let inserted = store.insert_products(demo_products()).await?;
    tracing::info!(inserted, "Catalog seeded");
    Ok(SeedOutcome {
        message: SEEDED.to_string(),
        count: inserted as u64,
    })
}

/// Connectivity report served by `GET /test`.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostics {
    pub backend: String,
    pub database: String,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub connection_status: String,
    pub collections: Vec<String>,
}

/// Probe the store. Never fails: store errors end up in `database`, truncated.
pub async fn diagnose(store: Option<&dyn CatalogStore>, database_url_set: bool) -> Diagnostics {
    let mut report = Diagnostics {
        backend: "✅ Running".to_string(),
        database: "❌ Not Available".to_string(),
        database_url: None,
        database_name: None,
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    let Some(store) = store else {
        report.database = "⚠️  Available but not initialized".to_string();
        return report;
    };

    report.database = "✅ Available".to_string();
    report.database_url = Some(if database_url_set { "✅ Set" } else { "❌ Not Set" }.to_string());
    report.database_name = Some(store.database_name().to_string());
    report.connection_status = "Connected".to_string();

    match store.list_collection_names().await {
        Ok(mut collections) => {
            collections.truncate(MAX_LISTED_COLLECTIONS);
            report.collections = collections;
            report.database = "✅ Connected & Working".to_string();
        }
        Err(e) => {
            tracing::warn!(error = %e, "Store diagnostics failed");
            report.database = format!(
                "⚠️  Connected but Error: {}",
                truncate_chars(&error_text(e), DIAGNOSTIC_ERROR_CHARS)
            );
        }
    }

    report
}

fn error_text(err: AppError) -> String {
    match err {
        AppError::DatabaseError(inner) => inner.to_string(),
        other => other.to_string(),
    }
}

/// First `max` characters of `text`.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
