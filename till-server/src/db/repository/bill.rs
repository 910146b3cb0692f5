//! Bill Repository
//!
//! Owns the transactional sale path: stock validation, stock decrement,
//! line item snapshots and the bill total are committed atomically, or not
//! at all.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, info};

use super::{RepoError, RepoResult};
use crate::db::models::{Bill, BillItem, BillItemDetail, BillWithItems, NewBill, Product};

#[derive(Clone)]
pub struct BillRepository {
    pool: PgPool,
}

impl BillRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find all bills with their line items, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<BillWithItems>> {
        let bills = sqlx::query_as::<_, Bill>(
            r#"
            SELECT id, customer_name, total, payment_mode, created_at
            FROM bills
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        #[derive(sqlx::FromRow)]
        struct ItemRow {
            id: i32,
            bill_id: i32,
            product_id: i32,
            quantity: i32,
            price: Decimal,
            product_name: String,
        }

        let items = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT bi.id, bi.bill_id, bi.product_id, bi.quantity, bi.price,
                   p.name AS product_name
            FROM bill_items bi
            JOIN products p ON p.id = bi.product_id
            ORDER BY bi.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut by_bill: HashMap<i32, Vec<BillItemDetail>> = HashMap::new();
        for row in items {
            by_bill.entry(row.bill_id).or_default().push(BillItemDetail {
                id: row.id,
                product_id: row.product_id,
                quantity: row.quantity,
                price: row.price,
                product_name: row.product_name,
            });
        }

        Ok(bills
            .into_iter()
            .map(|bill| {
                let items = by_bill.remove(&bill.id).unwrap_or_default();
                BillWithItems {
                    id: bill.id,
                    customer_name: bill.customer_name,
                    total: bill.total,
                    payment_mode: bill.payment_mode,
                    created_at: bill.created_at,
                    items,
                }
            })
            .collect())
    }

    /// Create a bill against current stock.
    ///
    /// Everything below happens inside one transaction. Each requested
    /// product row is locked with `SELECT ... FOR UPDATE`, so two concurrent
    /// bills can never both pass the stock check for the same unit of stock:
    /// the second transaction blocks on the lock and then observes the first
    /// one's decrement. Any failure (missing product, insufficient stock,
    /// statement error) returns before commit and the dropped transaction
    /// rolls everything back, leaving no partial decrements and no orphaned
    /// bill or items.
    pub async fn create(&self, input: NewBill) -> RepoResult<BillWithItems> {
        let mut tx = self.pool.begin().await?;

        // Placeholder total obtains the bill identity up front
        let bill = sqlx::query_as::<_, Bill>(
            r#"
            INSERT INTO bills (customer_name, total, payment_mode)
            VALUES ($1, 0, $2)
            RETURNING id, customer_name, total, payment_mode, created_at
            "#,
        )
        .bind(&input.customer_name)
        .bind(input.payment_mode)
        .fetch_one(&mut *tx)
        .await?;

        let mut total = Decimal::ZERO;
        let mut items = Vec::with_capacity(input.items.len());

        for line in &input.items {
            let product = sqlx::query_as::<_, Product>(
                r#"
                SELECT id, name, price, stock, image_url
                FROM products
                WHERE id = $1
                FOR UPDATE
                "#,
            )
            .bind(line.product_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| RepoError::NotFound("Product not found".to_string()))?;

            if product.stock < line.quantity {
                return Err(RepoError::InsufficientStock {
                    name: product.name,
                    available: product.stock,
                });
            }

            sqlx::query("UPDATE products SET stock = stock - $1 WHERE id = $2")
                .bind(line.quantity)
                .bind(product.id)
                .execute(&mut *tx)
                .await?;

            // Snapshot the current unit price onto the line item
            let item = sqlx::query_as::<_, BillItem>(
                r#"
                INSERT INTO bill_items (bill_id, product_id, quantity, price)
                VALUES ($1, $2, $3, $4)
                RETURNING id, bill_id, product_id, quantity, price
                "#,
            )
            .bind(bill.id)
            .bind(product.id)
            .bind(line.quantity)
            .bind(product.price)
            .fetch_one(&mut *tx)
            .await?;

            total += product.price * Decimal::from(line.quantity);
            items.push(BillItemDetail {
                id: item.id,
                product_id: item.product_id,
                quantity: item.quantity,
                price: item.price,
                product_name: product.name,
            });
        }

        let final_total = input.custom_total.unwrap_or(total);

        sqlx::query("UPDATE bills SET total = $1 WHERE id = $2")
            .bind(final_total)
            .bind(bill.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(
            bill_id = bill.id,
            customer = %bill.customer_name,
            total = %final_total,
            item_count = items.len(),
            "Bill created"
        );

        Ok(BillWithItems {
            id: bill.id,
            customer_name: bill.customer_name,
            total: final_total,
            payment_mode: bill.payment_mode,
            created_at: bill.created_at,
            items,
        })
    }

    /// Delete a bill and its line items. Stock is not restored.
    pub async fn delete(&self, id: i32) -> RepoResult<Bill> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM bill_items WHERE bill_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let bill = sqlx::query_as::<_, Bill>(
            r#"
            DELETE FROM bills
            WHERE id = $1
            RETURNING id, customer_name, total, payment_mode, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| RepoError::NotFound("Bill not found".to_string()))?;

        tx.commit().await?;

        debug!(bill_id = id, "Bill deleted");
        Ok(bill)
    }
}
