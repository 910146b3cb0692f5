//! Product API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Product, ProductCreate, StockPatch};
use crate::db::repository::ProductRepository;
use crate::utils::validation::{MAX_NAME_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text};
use crate::utils::{AppError, AppResult};

/// GET /api/products - 获取所有商品
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.get_db());
    let products = repo.find_all().await?;
    Ok(Json(products))
}

/// POST /api/products - 创建商品
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<(StatusCode, Json<Product>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    if payload.price.is_sign_negative() {
        return Err(AppError::validation("price must be a non-negative number"));
    }
    if payload.stock < 0 {
        return Err(AppError::validation("stock must be a non-negative number"));
    }

    let repo = ProductRepository::new(state.get_db());
    let product = repo.create(payload).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// PATCH /api/products/{id}/stock - 修正库存
///
/// 每次修正都会以当前管理员身份写入一条审计记录
pub async fn update_stock(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Extension(admin): Extension<CurrentUser>,
    Json(payload): Json<StockPatch>,
) -> AppResult<Json<Product>> {
    if payload.stock < 0 {
        return Err(AppError::validation("Stock must be a non-negative number"));
    }

    let repo = ProductRepository::new(state.get_db());
    let product = repo
        .update_stock(id, payload.stock, &admin.username)
        .await?;

    Ok(Json(product))
}

/// Response for product deletion
#[derive(Debug, Serialize)]
pub struct DeleteProductResponse {
    pub message: String,
    pub product: Product,
}

/// DELETE /api/products/{id} - 删除商品
///
/// 有销售历史的商品拒绝删除
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> AppResult<Json<DeleteProductResponse>> {
    let repo = ProductRepository::new(state.get_db());
    let product = repo.delete(id).await?;

    Ok(Json(DeleteProductResponse {
        message: format!("{} removed from inventory.", product.name),
        product,
    }))
}
