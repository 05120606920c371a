use axum::{extract::State, Json};
use serde_json::{json, Value};
use service_core::error::AppError;

use crate::services::{catalog, record_seed, Diagnostics, SeedOutcome};
use crate::startup::AppState;

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Marketplace backend running" }))
}

/// Store connectivity report. Always 200; failures are described in the body.
#[tracing::instrument(skip(state))]
pub async fn diagnostics(State(state): State<AppState>) -> Json<Diagnostics> {
    let report = catalog::diagnose(
        state.catalog.as_deref(),
        state.config.database.url.is_some(),
    )
    .await;
    Json(report)
}

#[tracing::instrument(skip(state))]
pub async fn seed(State(state): State<AppState>) -> Result<Json<SeedOutcome>, AppError> {
    let store = state.store()?;
    let outcome = catalog::seed_catalog(store).await?;
    record_seed(if outcome.was_seeded() { "seeded" } else { "skipped" });
    Ok(Json(outcome))
}

pub async fn not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("Not Found"))
}
