//! Bill API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::models::{Bill, BillCreate, BillWithItems};
use crate::db::repository::BillRepository;
use crate::utils::AppResult;

/// GET /api/bills - 获取所有账单 (含明细)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<BillWithItems>>> {
    let repo = BillRepository::new(state.get_db());
    let bills = repo.find_all().await?;
    Ok(Json(bills))
}

/// POST /api/bills - 开单
///
/// 校验通过后进入事务：逐项锁定商品行、校验并扣减库存、落明细，
/// 任一失败则整体回滚
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BillCreate>,
) -> AppResult<(StatusCode, Json<BillWithItems>)> {
    let input = payload.normalize()?;

    let repo = BillRepository::new(state.get_db());
    let bill = repo.create(input).await?;

    Ok((StatusCode::CREATED, Json(bill)))
}

/// Response for bill deletion
#[derive(Debug, Serialize)]
pub struct DeleteBillResponse {
    pub message: String,
    pub bill: Bill,
}

/// DELETE /api/bills/{id} - 删除账单
///
/// 级联删除明细；不回补库存
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> AppResult<Json<DeleteBillResponse>> {
    let repo = BillRepository::new(state.get_db());
    let bill = repo.delete(id).await?;

    Ok(Json(DeleteBillResponse {
        message: "Bill deleted successfully".to_string(),
        bill,
    }))
}
