//! Stock Update Audit Model

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Append-only audit entry for a manual stock correction
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct StockUpdate {
    pub id: i32,
    pub product_id: i32,
    pub old_stock: i32,
    pub new_stock: i32,
    /// Username of the admin that performed the correction
    pub updated_by: String,
    pub created_at: DateTime<Utc>,
}

/// Audit entry joined with its product name for API responses
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct StockUpdateWithProduct {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub old_stock: i32,
    pub new_stock: i32,
    pub updated_by: String,
    pub created_at: DateTime<Utc>,
}
