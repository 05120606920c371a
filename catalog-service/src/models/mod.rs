pub mod product;

pub use product::{Category, Product, ProductDocument, UnknownCategory};
