//! Product API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router(state: ServerState) -> Router<ServerState> {
    Router::new().nest("/api/products", product_routes(state))
}

fn product_routes(state: ServerState) -> Router<ServerState> {
    // 写操作需要管理员令牌；商品列表公开给收银界面
    let admin_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}/stock", patch(handler::update_stock))
        .route("/{id}", delete(handler::remove))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/", get(handler::list))
        .merge(admin_routes)
}
