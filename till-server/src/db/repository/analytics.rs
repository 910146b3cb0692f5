//! Analytics Repository
//!
//! Canned read-only aggregates over bills and bill items. Nothing here
//! mutates state; sums are COALESCE'd so empty periods report zeros rather
//! than nulls.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use super::RepoResult;

/// Collection totals for a period, split by payment mode
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CollectionSummary {
    pub total_amount: Decimal,
    pub total_bills: i64,
    pub cash_amount: Decimal,
    pub online_amount: Decimal,
}

/// Best-selling product row
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BestSellingProduct {
    pub id: i32,
    pub name: String,
    pub image_url: Option<String>,
    pub price: Decimal,
    pub total_quantity: i64,
    pub total_revenue: Decimal,
    pub times_sold: i64,
}

/// Per-product sales line for detailed reports
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProductSales {
    pub id: i32,
    pub name: String,
    pub quantity_sold: i64,
    pub revenue: Decimal,
}

const SUMMARY_COLUMNS: &str = r#"
    COALESCE(SUM(total), 0)::numeric AS total_amount,
    COUNT(*) AS total_bills,
    COALESCE(SUM(CASE WHEN payment_mode = 'cash' THEN total ELSE 0 END), 0)::numeric AS cash_amount,
    COALESCE(SUM(CASE WHEN payment_mode = 'online' THEN total ELSE 0 END), 0)::numeric AS online_amount
"#;

#[derive(Clone)]
pub struct AnalyticsRepository {
    pool: PgPool,
}

impl AnalyticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Today's collections, split by payment mode
    pub async fn today_summary(&self) -> RepoResult<CollectionSummary> {
        let summary = sqlx::query_as::<_, CollectionSummary>(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM bills WHERE DATE(created_at) = CURRENT_DATE"
        ))
        .fetch_one(&self.pool)
        .await?;
        Ok(summary)
    }

    /// Current month's collections, split by payment mode
    pub async fn monthly_summary(&self) -> RepoResult<CollectionSummary> {
        let summary = sqlx::query_as::<_, CollectionSummary>(&format!(
            r#"
            SELECT {SUMMARY_COLUMNS} FROM bills
            WHERE DATE_TRUNC('month', created_at) = DATE_TRUNC('month', CURRENT_DATE)
            "#
        ))
        .fetch_one(&self.pool)
        .await?;
        Ok(summary)
    }

    /// Top 10 products by quantity sold
    pub async fn best_selling(&self) -> RepoResult<Vec<BestSellingProduct>> {
        let products = sqlx::query_as::<_, BestSellingProduct>(
            r#"
            SELECT
                p.id,
                p.name,
                p.image_url,
                p.price,
                COALESCE(SUM(bi.quantity), 0)::bigint AS total_quantity,
                COALESCE(SUM(bi.quantity * bi.price), 0)::numeric AS total_revenue,
                COUNT(DISTINCT bi.bill_id) AS times_sold
            FROM products p
            LEFT JOIN bill_items bi ON bi.product_id = p.id
            GROUP BY p.id, p.name, p.image_url, p.price
            HAVING COALESCE(SUM(bi.quantity), 0) > 0
            ORDER BY total_quantity DESC
            LIMIT 10
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    /// Collections summary for one calendar day
    pub async fn daily_summary(&self, date: NaiveDate) -> RepoResult<CollectionSummary> {
        let summary = sqlx::query_as::<_, CollectionSummary>(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM bills WHERE DATE(created_at) = $1"
        ))
        .bind(date)
        .fetch_one(&self.pool)
        .await?;
        Ok(summary)
    }

    /// Products sold on one calendar day, with quantities and revenue
    pub async fn daily_product_sales(&self, date: NaiveDate) -> RepoResult<Vec<ProductSales>> {
        let products = sqlx::query_as::<_, ProductSales>(
            r#"
            SELECT
                p.id,
                p.name,
                SUM(bi.quantity)::bigint AS quantity_sold,
                SUM(bi.quantity * bi.price)::numeric AS revenue
            FROM bills b
            JOIN bill_items bi ON b.id = bi.bill_id
            JOIN products p ON bi.product_id = p.id
            WHERE DATE(b.created_at) = $1
            GROUP BY p.id, p.name
            ORDER BY quantity_sold DESC
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    /// Collections summary for one calendar month
    pub async fn monthly_summary_for(&self, year: i32, month: i32) -> RepoResult<CollectionSummary> {
        let summary = sqlx::query_as::<_, CollectionSummary>(&format!(
            r#"
            SELECT {SUMMARY_COLUMNS} FROM bills
            WHERE EXTRACT(YEAR FROM created_at)::int = $1
              AND EXTRACT(MONTH FROM created_at)::int = $2
            "#
        ))
        .bind(year)
        .bind(month)
        .fetch_one(&self.pool)
        .await?;
        Ok(summary)
    }

    /// Products sold in one calendar month, with quantities and revenue
    pub async fn monthly_product_sales(
        &self,
        year: i32,
        month: i32,
    ) -> RepoResult<Vec<ProductSales>> {
        let products = sqlx::query_as::<_, ProductSales>(
            r#"
            SELECT
                p.id,
                p.name,
                SUM(bi.quantity)::bigint AS quantity_sold,
                SUM(bi.quantity * bi.price)::numeric AS revenue
            FROM bills b
            JOIN bill_items bi ON b.id = bi.bill_id
            JOIN products p ON bi.product_id = p.id
            WHERE EXTRACT(YEAR FROM b.created_at)::int = $1
              AND EXTRACT(MONTH FROM b.created_at)::int = $2
            GROUP BY p.id, p.name
            ORDER BY quantity_sold DESC
            "#,
        )
        .bind(year)
        .bind(month)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }
}
