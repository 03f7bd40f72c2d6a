use std::collections::HashMap;

use axum::{body::Bytes, extract::State, response::Json};
use chrono::Utc;
use log::{error, warn};

use crate::account::{flatten_positions, summarize, AccountSummary, PositionsResponse};
use crate::api::error::ApiError;
use crate::api::models::{OrderResponse, StatusResponse};
use crate::market::{price_map, MarketRow};
use crate::order_log::{OrderIntent, OrdersResponse};
use crate::server::ServerState;

const MISSING_L1_ADDRESS: &str = "LIGHTER_L1_ADDRESS not set in env";

fn l1_address(state: &ServerState) -> Result<&str, ApiError> {
    state
        .config
        .l1_address
        .as_deref()
        .ok_or_else(|| ApiError::MissingConfig(MISSING_L1_ADDRESS.to_string()))
}

/// 헬스체크
pub async fn healthz() -> &'static str {
    "backend-ok"
}

/// 서버 상태
pub async fn get_status() -> Json<StatusResponse> {
    Json(StatusResponse {
        network_id: 1,
        status: 200,
        timestamp: Utc::now().timestamp(),
    })
}

/// 병합된 시장 목록 조회 (`/api/markets`, `/api/markets/live`)
pub async fn get_markets(State(state): State<ServerState>) -> Result<Json<Vec<MarketRow>>, ApiError> {
    match state.markets.load_merged_markets().await {
        Ok(rows) => Ok(Json(rows)),
        Err(e) => {
            error!("시장 목록 조회 실패: {}", e);
            Err(e.into())
        }
    }
}

/// 계정 요약 조회
pub async fn get_account_summary(
    State(state): State<ServerState>,
) -> Result<Json<AccountSummary>, ApiError> {
    let address = l1_address(&state)?;

    let resp = state.upstream.account_by_l1(address).await.map_err(|e| {
        error!("계정 조회 실패 ({}): {}", address, e);
        ApiError::Upstream("failed to fetch accounts".to_string())
    })?;

    Ok(Json(summarize(&resp).with_account_id(address)))
}

/// 모든 서브 계정의 포지션 조회
///
/// 시장 가격 조회 실패는 치명적이지 않으며, 이 경우 포지션 자체 값으로
/// 마크 가격을 계산합니다.
pub async fn get_account_positions(
    State(state): State<ServerState>,
) -> Result<Json<PositionsResponse>, ApiError> {
    let address = l1_address(&state)?;

    let (account, markets) = tokio::join!(
        state.upstream.account_by_l1(address),
        state.markets.load_merged_markets(),
    );

    let account = account.map_err(|e| {
        error!("계정 포지션 조회 실패 ({}): {}", address, e);
        ApiError::Upstream("failed to fetch account positions".to_string())
    })?;

    let prices = match markets {
        Ok(rows) => price_map(&rows),
        Err(e) => {
            warn!("포지션용 시장 가격 조회 실패, 대체 가격 사용: {}", e);
            HashMap::new()
        }
    };

    Ok(Json(PositionsResponse {
        positions: flatten_positions(&account, &prices),
    }))
}

/// 메모리 주문 로그 스냅샷
pub async fn get_account_orders(State(state): State<ServerState>) -> Json<OrdersResponse> {
    Json(OrdersResponse {
        orders: state.orders.snapshot().await,
    })
}

/// 주문 제출 핸들러 (스텁: 업스트림으로 전송하지 않음)
pub async fn submit_order(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<Json<OrderResponse>, ApiError> {
    let intent: OrderIntent = serde_json::from_slice(&body).map_err(|e| {
        warn!("주문 디코딩 실패: {}", e);
        ApiError::BadRequest("invalid JSON".to_string())
    })?;

    let entry = state.orders.submit(intent.clone()).await?;

    Ok(Json(OrderResponse {
        order_id: entry.order_id,
        status: "accepted".to_string(),
        message: "stubbed order (not sent to exchange yet)".to_string(),
        request: intent,
    }))
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
