//! Typed product filter shared by every catalog store.
//!
//! The MongoDB store renders it with [`ProductFilter::to_document`]; the
//! in-memory store evaluates it with [`ProductFilter::matches`]. Both must
//! agree on semantics.

use crate::models::{Category, Product};
use mongodb::bson::{doc, Document};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<Category>,
    pub featured: Option<bool>,
    /// Inclusive lower bound.
    pub min_price: Option<f64>,
    /// Inclusive upper bound.
    pub max_price: Option<f64>,
    /// Case-insensitive substring of title or description, or an exact tag.
    pub query: Option<String>,
}

impl ProductFilter {
    pub fn featured_only() -> Self {
        Self {
            featured: Some(true),
            ..Self::default()
        }
    }

    pub fn to_document(&self) -> Document {
        let mut filter = doc! {};

        if let Some(category) = self.category {
            filter.insert("category", category.to_string());
        }

        if let Some(featured) = self.featured {
            filter.insert("featured", featured);
        }

        if self.min_price.is_some() || self.max_price.is_some() {
            let mut price = doc! {};
            if let Some(min) = self.min_price {
                price.insert("$gte", min);
            }
            if let Some(max) = self.max_price {
                price.insert("$lte", max);
            }
            filter.insert("price", price);
        }

        if let Some(query) = &self.query {
            // User text is matched literally, never as a pattern.
            let pattern = regex::escape(query);
            filter.insert(
                "$or",
                vec![
                    doc! { "title": { "$regex": pattern.as_str(), "$options": "i" } },
                    doc! { "description": { "$regex": pattern.as_str(), "$options": "i" } },
                    doc! { "tags": { "$in": [query.as_str()] } },
                ],
            );
        }

        filter
    }

    pub fn matches(&self, product: &Product) -> bool {
        if self.category.is_some_and(|c| c != product.category) {
            return false;
        }
        if self.featured.is_some_and(|f| f != product.featured) {
            return false;
        }
        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }

        match &self.query {
            Some(query) => {
                let needle = query.to_lowercase();
                product.title.to_lowercase().contains(&needle)
                    || product.description.to_lowercase().contains(&needle)
                    || product.tags.iter().any(|tag| tag == query)
            }
            None => true,
        }
    }
}
