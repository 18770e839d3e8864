//! Product domain types.

use chrono::{DateTime, Utc};

use catalog_core::{Price, ProductId, ProductName};

/// A stored catalog product.
#[derive(Debug, Clone)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: ProductName,
    /// Free-form description.
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
}

/// A validated product that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: ProductName,
    pub description: String,
    pub price: Price,
}
