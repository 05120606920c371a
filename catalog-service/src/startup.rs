//! Application startup and lifecycle management.
//!
//! Builds the store from configuration, wires the HTTP router and runs it until
//! a shutdown signal arrives.

use crate::config::{CatalogConfig, MEMORY_URL_SCHEME};
use crate::handlers;
use crate::services::{CatalogDb, CatalogStore, MemoryCatalogStore};
use axum::{
    http::HeaderValue,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{http_trace_layer, metrics_middleware, request_id_middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: CatalogConfig,
    /// `None` when no `DATABASE_URL` was configured.
    pub catalog: Option<Arc<dyn CatalogStore>>,
}

impl AppState {
    pub fn store(&self) -> Result<&dyn CatalogStore, AppError> {
        self.catalog.as_deref().ok_or(AppError::DatabaseNotConfigured)
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/", get(handlers::root))
        .route("/test", get(handlers::diagnostics))
        .route("/seed", post(handlers::seed))
        .route("/products", get(handlers::list_products))
        .route("/products/featured", get(handlers::featured_products))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(http_trace_layer())
        .layer(from_fn(request_id_middleware))
        .layer(cors)
}

fn cors_layer(config: &CatalogConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.cors.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors
        .allowed_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("Invalid CORS origin '{}': {}. Skipping.", o, e);
                None
            }
        })
        .collect();

    layer.allow_origin(origins)
}

/// Open the store named by the configuration, if any.
async fn connect_store(config: &CatalogConfig) -> Result<Option<Arc<dyn CatalogStore>>, AppError> {
    let Some(url) = config.database.url.as_deref() else {
        tracing::warn!("DATABASE_URL not set; catalog routes will report the database as not configured");
        return Ok(None);
    };

    if config.database.is_memory() {
        let name = config
            .database
            .name
            .clone()
            .unwrap_or_else(|| url.trim_start_matches(MEMORY_URL_SCHEME).to_string());
        tracing::info!(database = %name, "Using in-memory catalog store");
        return Ok(Some(Arc::new(MemoryCatalogStore::new(name))));
    }

    let db = CatalogDb::connect(url, config.database.name.as_deref()).await?;

    // Index creation needs a live server; the service still starts without one.
    if let Err(e) = db.initialize_indexes().await {
        tracing::warn!("Failed to initialize database indexes: {}", e);
    }

    Ok(Some(Arc::new(db)))
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: CatalogConfig) -> Result<Self, AppError> {
        let catalog = connect_store(&config).await.map_err(|e| {
            tracing::error!("Failed to open catalog store: {}", e);
            e
        })?;
        Self::build_with_store(config, catalog).await
    }

    /// Build the application around an already constructed store.
    pub async fn build_with_store(
        config: CatalogConfig,
        catalog: Option<Arc<dyn CatalogStore>>,
    ) -> Result<Self, AppError> {
        // Port 0 binds a random port (used by tests)
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Catalog service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            state: AppState { config, catalog },
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get the configured store, if any.
    pub fn store(&self) -> Option<Arc<dyn CatalogStore>> {
        self.state.catalog.clone()
    }

    /// Run the application until a shutdown signal is received.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CorsConfig, DatabaseConfig};
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use service_core::config::Config as CoreConfig;
    use tower::ServiceExt;

    fn unconfigured_state(origins: &[&str]) -> AppState {
        AppState {
            config: CatalogConfig {
                common: CoreConfig { port: 0 },
                database: DatabaseConfig {
                    url: None,
                    name: None,
                },
                cors: CorsConfig {
                    allowed_origins: origins.iter().map(|o| o.to_string()).collect(),
                },
            },
            catalog: None,
        }
    }

    #[tokio::test]
    async fn test_root_is_served_without_store() {
        let router = build_router(unconfigured_state(&["*"]));

        let response = router
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_seed_requires_post() {
        let router = build_router(unconfigured_state(&["*"]));

        let response = router
            .oneshot(Request::builder().uri("/seed").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let router = build_router(unconfigured_state(&["https://shop.example.com"]));

        let response = router
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/")
                    .header("origin", "https://shop.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("https://shop.example.com")
        );
    }

    #[test]
    fn test_store_is_required() {
        let state = unconfigured_state(&["*"]);
        assert!(matches!(state.store(), Err(AppError::DatabaseNotConfigured)));
    }
}
