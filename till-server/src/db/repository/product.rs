//! Product Repository

use sqlx::PgPool;
use tracing::debug;

use super::{RepoError, RepoResult};
use crate::db::models::{Product, ProductCreate, StockUpdate};

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find all products, ordered by name
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, stock, image_url FROM products ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    /// Insert a new product
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, price, stock, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, price, stock, image_url
            "#,
        )
        .bind(data.name.trim())
        .bind(data.price)
        .bind(data.stock)
        .bind(data.image_url)
        .fetch_one(&self.pool)
        .await?;

        debug!(id = product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Overwrite a product's stock level and append one audit entry.
    ///
    /// Both statements run in one transaction so the audit row's old value is
    /// the value that was actually overwritten. There is no row lock here:
    /// this path is an admin-only inventory correction, and concurrent
    /// corrections of the same product interleaving is accepted.
    pub async fn update_stock(
        &self,
        id: i32,
        new_stock: i32,
        updated_by: &str,
    ) -> RepoResult<Product> {
        let mut tx = self.pool.begin().await?;

        let old_stock: Option<i32> = sqlx::query_scalar("SELECT stock FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(old_stock) = old_stock else {
            return Err(RepoError::NotFound("Product not found".to_string()));
        };

        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET stock = $1
            WHERE id = $2
            RETURNING id, name, price, stock, image_url
            "#,
        )
        .bind(new_stock)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        let audit = sqlx::query_as::<_, StockUpdate>(
            r#"
            INSERT INTO stock_updates (product_id, old_stock, new_stock, updated_by)
            VALUES ($1, $2, $3, $4)
            RETURNING id, product_id, old_stock, new_stock, updated_by, created_at
            "#,
        )
        .bind(id)
        .bind(old_stock)
        .bind(new_stock)
        .bind(updated_by)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(
            product_id = id,
            old_stock,
            new_stock,
            updated_by,
            audit_id = audit.id,
            "Stock corrected"
        );
        Ok(product)
    }

    /// Delete a product, refusing while any bill item still references it
    pub async fn delete(&self, id: i32) -> RepoResult<Product> {
        let references: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM bill_items WHERE product_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        if references > 0 {
            return Err(RepoError::Conflict(
                "Cannot delete product that has been used in bills. This product has sales history."
                    .to_string(),
            ));
        }

        let product = sqlx::query_as::<_, Product>(
            r#"
            DELETE FROM products
            WHERE id = $1
            RETURNING id, name, price, stock, image_url
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepoError::NotFound("Product not found".to_string()))?;

        // Cosmetic: restart the id sequence once the table is empty
        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        if remaining == 0 {
            sqlx::query("ALTER SEQUENCE products_id_seq RESTART WITH 1")
                .execute(&self.pool)
                .await?;
        }

        debug!(id = product.id, name = %product.name, "Product deleted");
        Ok(product)
    }
}
