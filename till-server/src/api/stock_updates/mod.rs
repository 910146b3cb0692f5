//! Stock Update Audit API 模块

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router(state: ServerState) -> Router<ServerState> {
    Router::new().nest("/api/stock-updates", stock_update_routes(state))
}

fn stock_update_routes(state: ServerState) -> Router<ServerState> {
    // 审计记录仅管理员可见
    Router::new()
        .route("/", get(handler::list))
        .route("/product/{id}", get(handler::list_for_product))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}
