//! Stock Update Audit API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::StockUpdateWithProduct;
use crate::db::repository::StockUpdateRepository;
use crate::utils::AppResult;

/// Cap on the cross-product history listing
const RECENT_LIMIT: i64 = 100;

/// GET /api/stock-updates - 最近的库存修正记录
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<StockUpdateWithProduct>>> {
    let repo = StockUpdateRepository::new(state.get_db());
    let updates = repo.find_recent(RECENT_LIMIT).await?;
    Ok(Json(updates))
}

/// GET /api/stock-updates/product/{id} - 单个商品的全部修正记录
pub async fn list_for_product(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<StockUpdateWithProduct>>> {
    let repo = StockUpdateRepository::new(state.get_db());
    let updates = repo.find_by_product(id).await?;
    Ok(Json(updates))
}
