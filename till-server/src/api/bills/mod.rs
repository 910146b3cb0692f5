//! Bill API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router(state: ServerState) -> Router<ServerState> {
    Router::new().nest("/api/bills", bill_routes(state))
}

fn bill_routes(state: ServerState) -> Router<ServerState> {
    // 开单是收银台操作，无需登录；删除账单需要管理员令牌
    let admin_routes = Router::new()
        .route("/{id}", delete(handler::remove))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .merge(admin_routes)
}
