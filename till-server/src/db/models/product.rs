//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    /// Unit price, frozen onto bill items at sale time
    pub price: Decimal,
    /// Units available for sale, never negative
    pub stock: i32,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Create product payload
#[derive(Debug, Clone, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Stock correction payload (PATCH /api/products/{id}/stock)
#[derive(Debug, Clone, Deserialize)]
pub struct StockPatch {
    pub stock: i32,
}
