//! 통합 테스트 공용 도구

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use lighter_gateway::server::{build_router, ServerConfig, ServerState};
use lighter_gateway::upstream::model::AccountByL1Response;
use lighter_gateway::upstream::{UpstreamApi, UpstreamError};

/// 고정 응답을 돌려주는 업스트림. `None`인 엔드포인트는 500으로 실패합니다.
#[derive(Clone, Default)]
pub struct FakeUpstream {
    pub details: Option<Value>,
    pub stats: Option<Value>,
    pub funding: Option<Value>,
    pub account: Option<Value>,
    /// orderBookDetails 호출 횟수 (클론끼리 공유)
    pub details_calls: Arc<AtomicUsize>,
}

fn failure(path: &str) -> UpstreamError {
    UpstreamError::Status {
        method: "GET".to_string(),
        path: path.to_string(),
        status: 500,
        body: "upstream exploded".to_string(),
    }
}

fn raw(value: &Option<Value>, path: &str) -> Result<Vec<u8>, UpstreamError> {
    match value {
        Some(value) => Ok(serde_json::to_vec(value).expect("json")),
        None => Err(failure(path)),
    }
}

#[async_trait]
impl UpstreamApi for FakeUpstream {
    async fn order_book_details(&self) -> Result<Vec<u8>, UpstreamError> {
        self.details_calls.fetch_add(1, Ordering::SeqCst);
        raw(&self.details, "/api/v1/orderBookDetails")
    }

    async fn exchange_stats(&self) -> Result<Vec<u8>, UpstreamError> {
        raw(&self.stats, "/api/v1/exchangeStats")
    }

    async fn funding_rates(&self) -> Result<Vec<u8>, UpstreamError> {
        raw(&self.funding, "/api/v1/funding-rates")
    }

    async fn account_by_l1(&self, _address: &str) -> Result<AccountByL1Response, UpstreamError> {
        match &self.account {
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|e| UpstreamError::decode("/api/v1/account", e)),
            None => Err(failure("/api/v1/account")),
        }
    }
}

/// BTC, ETH 두 종목이 모두 정상 응답하는 업스트림
pub fn healthy_upstream() -> FakeUpstream {
    FakeUpstream {
        details: Some(json!({
            "code": 200,
            "order_book_details": [
                {"symbol": "BTC", "market_id": 1, "status": "active",
                 "taker_fee": "0.0000", "maker_fee": "0.0000", "open_interest": 10},
                {"symbol": "ETH", "market_id": 0, "status": "active",
                 "taker_fee": "0.0000", "maker_fee": "0.0000", "open_interest": 100.5}
            ]
        })),
        stats: Some(json!({
            "code": 200,
            "total": 2,
            "order_book_stats": [
                {"symbol": "BTC", "last_trade_price": 50000, "daily_price_change": 2.5,
                 "daily_base_token_volume": 100, "daily_quote_token_volume": 5000000},
                {"symbol": "ETH", "last_trade_price": 3000, "daily_price_change": -1.25,
                 "daily_base_token_volume": 1000, "daily_quote_token_volume": 3000000}
            ]
        })),
        funding: Some(json!({
            "code": 200,
            "funding_rates": [
                {"market_id": 1, "exchange": "lighter", "symbol": "BTC", "rate": 0.0001},
                {"market_id": 0, "exchange": "lighter", "symbol": "ETH", "rate": -0.0002}
            ]
        })),
        account: Some(json!({
            "code": 200,
            "total": 2,
            "accounts": [
                {"index": 1, "l1_address": "0xabc", "collateral": "10000",
                 "positions": [
                    {"market_id": 0, "symbol": "ETH", "sign": -1, "position": "-2.0",
                     "position_value": "-6000", "avg_entry_price": "3100",
                     "unrealized_pnl": "200", "realized_pnl": "-5",
                     "allocated_margin": "1200", "initial_margin_fraction": "5"},
                    {"market_id": 1, "symbol": "BTC", "sign": 1, "position": "0",
                     "position_value": "0", "allocated_margin": "0",
                     "initial_margin_fraction": "10"}
                 ]},
                {"index": 2, "l1_address": "0xabc", "collateral": "",
                 "positions": [
                    {"market_id": 1, "symbol": "BTC", "sign": 1, "position": "0.5",
                     "position_value": "24000", "avg_entry_price": "48000",
                     "allocated_margin": "800", "initial_margin_fraction": "10"}
                 ]}
            ]
        })),
        details_calls: Arc::default(),
    }
}

pub fn test_config(l1_address: Option<&str>) -> ServerConfig {
    ServerConfig {
        l1_address: l1_address.map(str::to_string),
        ..ServerConfig::default()
    }
}

pub fn router_with(upstream: FakeUpstream, l1_address: Option<&str>) -> Router {
    build_router(ServerState::new(test_config(l1_address), Arc::new(upstream)))
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body")
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("json body")
}
