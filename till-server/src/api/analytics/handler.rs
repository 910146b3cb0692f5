//! Analytics API Handlers
//!
//! Read-only aggregate reports over bills and bill items

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::AnalyticsRepository;
use crate::db::repository::analytics::{BestSellingProduct, CollectionSummary, ProductSales};
use crate::utils::{AppError, AppResult};

// ============================================================================
// Query Parameters
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct DailySalesQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MonthlySalesQuery {
    pub month: Option<String>,
    pub year: Option<String>,
}

// ============================================================================
// Response Types
// ============================================================================

/// Detailed report for one day
#[derive(Debug, Serialize)]
pub struct DailySalesReport {
    pub summary: CollectionSummary,
    pub products: Vec<ProductSales>,
    pub date: String,
}

/// Detailed report for one month
#[derive(Debug, Serialize)]
pub struct MonthlySalesReport {
    pub summary: CollectionSummary,
    pub products: Vec<ProductSales>,
    pub month: i32,
    pub year: i32,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/analytics/today - 今日收款汇总
pub async fn today(State(state): State<ServerState>) -> AppResult<Json<CollectionSummary>> {
    let repo = AnalyticsRepository::new(state.get_db());
    let summary = repo.today_summary().await?;
    Ok(Json(summary))
}

/// GET /api/analytics/monthly - 当月收款汇总
pub async fn monthly(State(state): State<ServerState>) -> AppResult<Json<CollectionSummary>> {
    let repo = AnalyticsRepository::new(state.get_db());
    let summary = repo.monthly_summary().await?;
    Ok(Json(summary))
}

/// GET /api/analytics/best-selling - 销量前十商品
pub async fn best_selling(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<BestSellingProduct>>> {
    let repo = AnalyticsRepository::new(state.get_db());
    let products = repo.best_selling().await?;
    Ok(Json(products))
}

/// GET /api/analytics/daily-sales?date=YYYY-MM-DD - 单日明细报表
pub async fn daily_sales(
    State(state): State<ServerState>,
    Query(query): Query<DailySalesQuery>,
) -> AppResult<Json<DailySalesReport>> {
    let date = parse_report_date(query.date.as_deref())?;

    let repo = AnalyticsRepository::new(state.get_db());
    let summary = repo.daily_summary(date).await?;
    let products = repo.daily_product_sales(date).await?;

    Ok(Json(DailySalesReport {
        summary,
        products,
        date: date.to_string(),
    }))
}

/// GET /api/analytics/monthly-sales?month=&year= - 单月明细报表
pub async fn monthly_sales(
    State(state): State<ServerState>,
    Query(query): Query<MonthlySalesQuery>,
) -> AppResult<Json<MonthlySalesReport>> {
    let (year, month) = parse_report_month(query.year.as_deref(), query.month.as_deref())?;

    let repo = AnalyticsRepository::new(state.get_db());
    let summary = repo.monthly_summary_for(year, month).await?;
    let products = repo.monthly_product_sales(year, month).await?;

    Ok(Json(MonthlySalesReport {
        summary,
        products,
        month,
        year,
    }))
}

// ============================================================================
// Parameter Validation
// ============================================================================

/// Parse the report date; missing → today, malformed → 400
fn parse_report_date(raw: Option<&str>) -> Result<NaiveDate, AppError> {
    match raw {
        None => Ok(Utc::now().date_naive()),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| AppError::validation("Invalid date format. Use YYYY-MM-DD.")),
    }
}

/// Parse the report month/year; missing → current, out of range → 400
fn parse_report_month(
    raw_year: Option<&str>,
    raw_month: Option<&str>,
) -> Result<(i32, i32), AppError> {
    let now = Utc::now();

    let month = match raw_month {
        None => now.month() as i32,
        Some(s) => s
            .parse::<i32>()
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or_else(|| AppError::validation("Invalid month. Must be between 1 and 12."))?,
    };

    let year = match raw_year {
        None => now.year(),
        Some(s) => s
            .parse::<i32>()
            .ok()
            .filter(|y| (2000..=2100).contains(y))
            .ok_or_else(|| AppError::validation("Invalid year. Must be between 2000 and 2100."))?,
    };

    Ok((year, month))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_report_date() {
        assert_eq!(
            parse_report_date(Some("2026-08-04")).unwrap(),
            NaiveDate::from_ymd_opt(2026, 8, 4).unwrap()
        );
        assert!(parse_report_date(Some("04/08/2026")).is_err());
        assert!(parse_report_date(Some("not-a-date")).is_err());
        assert!(parse_report_date(Some("2026-13-40")).is_err());
        assert!(parse_report_date(None).is_ok());
    }

    #[test]
    fn test_parse_report_month_bounds() {
        assert_eq!(
            parse_report_month(Some("2026"), Some("8")).unwrap(),
            (2026, 8)
        );
        assert!(parse_report_month(Some("2026"), Some("0")).is_err());
        assert!(parse_report_month(Some("2026"), Some("13")).is_err());
        assert!(parse_report_month(Some("1999"), Some("5")).is_err());
        assert!(parse_report_month(Some("2101"), Some("5")).is_err());
        assert!(parse_report_month(Some("abc"), Some("5")).is_err());
        assert!(parse_report_month(None, None).is_ok());
    }
}
