use chrono::{DateTime, Utc};
use mongodb::bson::{oid::ObjectId, serde_helpers::chrono_datetime_as_bson_datetime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Women,
    Men,
    Home,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Women => write!(f, "women"),
            Category::Men => write!(f, "men"),
            Category::Home => write!(f, "home"),
        }
    }
}

#[derive(Debug, Error)]
#[error("Invalid category: {0}. Must be one of: women, men, home")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "women" => Ok(Category::Women),
            "men" => Ok(Category::Men),
            "home" => Ok(Category::Home),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// A catalog product as exposed to clients.
///
/// Carries no identifier: the store-assigned `_id` is dropped on read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct Product {
    pub title: String,
    pub description: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub category: Category,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub brand: String,
    #[validate(range(min = 0.0, max = 5.0))]
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
}

fn default_in_stock() -> bool {
    true
}

/// Storage shape of a product in the `product` collection.
///
/// Only ever written; reads go straight to [`Product`], which ignores the
/// extra fields.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(flatten)]
    pub product: Product,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl ProductDocument {
    pub fn new(product: Product) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            product,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, from_document};

    fn sample() -> Product {
        Product {
            title: "Ceramic Wave Vase".to_string(),
            description: "Minimal wave-pattern vase.".to_string(),
            price: 39.0,
            category: Category::Home,
            in_stock: true,
            image_url: String::new(),
            brand: "Haven".to_string(),
            rating: 4.6,
            tags: vec!["decor".to_string()],
            featured: false,
        }
    }

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!("Women".parse::<Category>().unwrap(), Category::Women);
        assert_eq!("HOME".parse::<Category>().unwrap(), Category::Home);
        let err = "toys".parse::<Category>().unwrap_err();
        assert!(err.to_string().contains("toys"));
    }

    #[test]
    fn test_negative_price_fails_validation() {
        let mut product = sample();
        product.price = -1.0;
        assert!(product.validate().is_err());
    }

    #[test]
    fn test_rating_above_five_fails_validation() {
        let mut product = sample();
        product.rating = 5.5;
        assert!(product.validate().is_err());
        product.rating = 5.0;
        assert!(product.validate().is_ok());
    }

    #[test]
    fn test_coerces_integer_price_and_ignores_id() {
        let document = doc! {
            "_id": ObjectId::new(),
            "title": "Matte Stone Candle Holder",
            "description": "Sculptural holder.",
            "price": 29_i32,
            "category": "home",
            "rating": 4_i64,
            "created_at": mongodb::bson::DateTime::now(),
        };

        let product: Product = from_document(document).unwrap();
        assert_eq!(product.price, 29.0);
        assert_eq!(product.rating, 4.0);
        assert!(product.in_stock);
        assert!(product.tags.is_empty());
        assert!(!product.featured);
    }

    #[test]
    fn test_serialized_product_has_no_identifier() {
        let value = serde_json::to_value(sample()).unwrap();
        assert!(value.get("_id").is_none());
        assert!(value.get("id").is_none());
        assert_eq!(value["category"], "home");
    }
}
