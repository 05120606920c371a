#![allow(dead_code)]

use catalog_service::config::{CatalogConfig, CorsConfig, DatabaseConfig};
use catalog_service::models::Product;
use catalog_service::services::{CatalogStore, MemoryCatalogStore};
use catalog_service::startup::Application;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use uuid::Uuid;

pub struct TestApp {
    pub http_address: String,
    pub http_port: u16,
    pub store: Option<Arc<dyn CatalogStore>>,
}

pub fn test_config(database_url: Option<String>) -> CatalogConfig {
    CatalogConfig {
        common: CoreConfig { port: 0 },
        database: DatabaseConfig {
            url: database_url,
            name: None,
        },
        cors: CorsConfig {
            allowed_origins: vec!["*".to_string()],
        },
    }
}

impl TestApp {
    /// Spawn the service backed by an empty in-memory store.
    pub async fn spawn() -> Self {
        Self::spawn_with_products(Vec::new()).await
    }

    pub async fn spawn_with_products(products: Vec<Product>) -> Self {
        let name = format!("catalog_test_{}", Uuid::new_v4());
        let store: Arc<dyn CatalogStore> =
            Arc::new(MemoryCatalogStore::with_products(name.clone(), products));
        Self::spawn_with_store(Some(format!("memory://{}", name)), Some(store)).await
    }

    /// Spawn the service with no store configured.
    pub async fn spawn_unconfigured() -> Self {
        Self::spawn_with_store(None, None).await
    }

    pub async fn spawn_with_store(
        database_url: Option<String>,
        store: Option<Arc<dyn CatalogStore>>,
    ) -> Self {
        let app = Application::build_with_store(test_config(database_url), store)
            .await
            .expect("Failed to build test application");

        let http_port = app.port();
        let store = app.store();
        let http_address = format!("http://127.0.0.1:{}", http_port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", http_address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            http_address,
            http_port,
            store,
        }
    }

    pub async fn get_json(&self, path: &str) -> (reqwest::StatusCode, serde_json::Value) {
        let response = reqwest::Client::new()
            .get(format!("{}{}", self.http_address, path))
            .send()
            .await
            .expect("Failed to execute request");
        let status = response.status();
        let body = response.json().await.expect("Failed to parse JSON");
        (status, body)
    }

    pub async fn post_json(&self, path: &str) -> (reqwest::StatusCode, serde_json::Value) {
        let response = reqwest::Client::new()
            .post(format!("{}{}", self.http_address, path))
            .send()
            .await
            .expect("Failed to execute request");
        let status = response.status();
        let body = response.json().await.expect("Failed to parse JSON");
        (status, body)
    }

    /// Seed the demo catalog through the API.
    pub async fn seed(&self) {
        let (status, _) = self.post_json("/seed").await;
        assert!(status.is_success(), "seeding failed with {}", status);
    }
}
