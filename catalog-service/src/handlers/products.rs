use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use service_core::error::AppError;

use crate::models::{Category, Product};
use crate::services::{catalog, record_products_returned, ProductFilter};
use crate::startup::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListProductsQuery {
    /// women | men | home
    pub category: Option<String>,
    pub q: Option<String>,
    pub featured: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ListProductsQuery {
    pub fn into_filter(self) -> Result<ProductFilter, AppError> {
        let category = match non_blank(self.category) {
            Some(c) => Some(
                c.parse::<Category>()
                    .map_err(|e| AppError::BadRequest(anyhow::anyhow!(e)))?,
            ),
            None => None,
        };

        let featured = match self.featured.as_deref().map(str::trim) {
            Some(f) => Some(parse_flag(f).ok_or_else(|| {
                AppError::BadRequest(anyhow::anyhow!(
                    "Invalid featured: {}. Must be true or false",
                    f
                ))
            })?),
            None => None,
        };

        Ok(ProductFilter {
            category,
            featured,
            min_price: finite_price("min_price", self.min_price)?,
            max_price: finite_price("max_price", self.max_price)?,
            query: non_blank(self.q),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// NaN and infinite bounds compare differently in MongoDB and in process.
fn finite_price(name: &str, value: Option<f64>) -> Result<Option<f64>, AppError> {
    match value {
        Some(v) if !v.is_finite() => Err(AppError::BadRequest(anyhow::anyhow!(
            "Invalid {}: {}. Must be a finite number",
            name,
            v
        ))),
        other => Ok(other),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" | "on" => Some(true),
        "false" | "f" | "0" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

#[tracing::instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<ListProductsQuery>, QueryRejection>,
) -> Result<Json<Vec<Product>>, AppError> {
    let Query(query) = query?;
    let store = state.store()?;
    let filter = query.into_filter()?;

    let products = catalog::list_products(store, &filter).await?;
    record_products_returned("list", products.len());

    Ok(Json(products))
}

#[tracing::instrument(skip(state))]
pub async fn featured_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, AppError> {
    let store = state.store()?;

    let products = catalog::featured_products(store).await?;
    record_products_returned("featured", products.len());

    Ok(Json(products))
}
