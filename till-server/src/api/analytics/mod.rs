//! Analytics API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/analytics", analytics_routes())
}

fn analytics_routes() -> Router<ServerState> {
    Router::new()
        .route("/today", get(handler::today))
        .route("/monthly", get(handler::monthly))
        .route("/best-selling", get(handler::best_selling))
        .route("/daily-sales", get(handler::daily_sales))
        .route("/monthly-sales", get(handler::monthly_sales))
}
