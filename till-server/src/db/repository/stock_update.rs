//! Stock Update Audit Repository
//!
//! Read side of the audit log; entries are appended by
//! [`super::ProductRepository::update_stock`].

use sqlx::PgPool;

use super::RepoResult;
use crate::db::models::StockUpdateWithProduct;

#[derive(Clone)]
pub struct StockUpdateRepository {
    pool: PgPool,
}

impl StockUpdateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Latest audit entries across all products
    pub async fn find_recent(&self, limit: i64) -> RepoResult<Vec<StockUpdateWithProduct>> {
        let updates = sqlx::query_as::<_, StockUpdateWithProduct>(
            r#"
            SELECT su.id, su.product_id, p.name AS product_name,
                   su.old_stock, su.new_stock, su.updated_by, su.created_at
            FROM stock_updates su
            JOIN products p ON su.product_id = p.id
            ORDER BY su.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(updates)
    }

    /// Full audit history for one product
    pub async fn find_by_product(&self, product_id: i32) -> RepoResult<Vec<StockUpdateWithProduct>> {
        let updates = sqlx::query_as::<_, StockUpdateWithProduct>(
            r#"
            SELECT su.id, su.product_id, p.name AS product_name,
                   su.old_stock, su.new_stock, su.updated_by, su.created_at
            FROM stock_updates su
            JOIN products p ON su.product_id = p.id
            WHERE su.product_id = $1
            ORDER BY su.created_at DESC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(updates)
    }
}
