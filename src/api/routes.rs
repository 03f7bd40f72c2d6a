use axum::{
    routing::{get, post},
    Router,
};

use crate::api::handlers::*;
use crate::api::websocket::markets_websocket_handler;
use crate::server::ServerState;

/// API 라우터 생성
pub fn create_api_router() -> Router<ServerState> {
    Router::new()
        .route("/api/healthz", get(healthz))
        .route("/api/status", get(get_status))

        // 시장 데이터 API
        .route("/api/markets", get(get_markets))
        .route("/api/markets/live", get(get_markets))

        // 계정 API
        .route("/api/account/summary", get(get_account_summary))
        .route("/api/account/positions", get(get_account_positions))
        .route("/api/account/orders", get(get_account_orders))

        // 주문 API
        .route(
            "/api/trade/order",
            post(submit_order).fallback(method_not_allowed),
        )

        // 실시간 시장 스냅샷
        .route("/ws/markets", get(markets_websocket_handler))
}
