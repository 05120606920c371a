//! Demo catalog inserted by `POST /seed`.

use crate::models::{Category, Product};

struct DemoProduct {
    title: &'static str,
    description: &'static str,
    price: f64,
    category: Category,
    image_url: &'static str,
    brand: &'static str,
    rating: f64,
    tags: &'static [&'static str],
    featured: bool,
}

const DEMO_PRODUCTS: [DemoProduct; 5] = [
    DemoProduct {
        title: "Velvet Rose Eau de Parfum",
        description: "A lush floral fragrance with notes of rose, amber, and musk.",
        price: 79.0,
        category: Category::Women,
        image_url: "https://images.unsplash.com/photo-1523292562811-8fa7962a78c8",
        brand: "Aurelia",
        rating: 4.7,
        tags: &["fragrance", "perfume", "floral"],
        featured: true,
    },
    DemoProduct {
        title: "Gentleman Grooming Kit",
        description: "Complete shaving and beard care kit with natural oils.",
        price: 59.0,
        category: Category::Men,
        image_url: "https://images.unsplash.com/photo-1600986603369-9d3d0f6f0f9b",
        brand: "NordCraft",
        rating: 4.5,
        tags: &["grooming", "kit", "beard"],
        featured: true,
    },
    DemoProduct {
        title: "Ceramic Wave Vase",
        description: "Minimal wave-pattern vase to elevate any interior.",
        price: 39.0,
        category: Category::Home,
        image_url: "https://images.unsplash.com/photo-1523419409543-a7cf3f4e8d8f",
        brand: "Haven",
        rating: 4.6,
        tags: &["decor", "vase", "ceramic"],
        featured: false,
    },
    DemoProduct {
        title: "Lavender Silk Body Lotion",
        description: "Ultra-hydrating lotion with calming lavender.",
        price: 24.0,
        category: Category::Women,
        image_url: "https://images.unsplash.com/photo-1585386959984-a41552231658",
        brand: "Serene",
        rating: 4.4,
        tags: &["body", "lotion", "lavender"],
        featured: false,
    },
    DemoProduct {
        title: "Matte Stone Candle Holder",
        description: "Sculptural holder with a soft matte finish.",
        price: 29.0,
        category: Category::Home,
        image_url: "https://images.unsplash.com/photo-1519710164239-da123dc03ef4",
        brand: "Aura",
        rating: 4.3,
        tags: &["decor", "candle"],
        featured: false,
    },
];

pub fn demo_products() -> Vec<Product> {
    DEMO_PRODUCTS
        .iter()
        .map(|p| Product {
            title: p.title.to_string(),
            description: p.description.to_string(),
            price: p.price,
            category: p.category,
            in_stock: true,
            image_url: p.image_url.to_string(),
            brand: p.brand.to_string(),
            rating: p.rating,
            tags: p.tags.iter().map(|t| t.to_string()).collect(),
            featured: p.featured,
        })
        .collect()
}
