use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::extract::Request;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use log::{info, warn};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::create_api_router;
use crate::market::MarketAggregator;
use crate::order_log::OrderLog;
use crate::upstream::client::DEFAULT_TIMEOUT;
use crate::upstream::{LighterClient, UpstreamApi, DEFAULT_BASE_URL};

/// 서버 설정
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub upstream_base_url: String,
    /// 계정 조회 키. 없으면 계정 API가 400을 반환합니다.
    pub l1_address: Option<String>,
    pub upstream_timeout: Duration,
    pub ws_interval: Duration,
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".into(),
            upstream_base_url: DEFAULT_BASE_URL.into(),
            l1_address: None,
            upstream_timeout: DEFAULT_TIMEOUT,
            ws_interval: Duration::from_secs(2), // 429 방지를 위해 약간 느리게
            cors_origin: "http://localhost:3000".into(),
        }
    }
}

impl ServerConfig {
    /// 프로세스 환경 변수에서 설정 로드
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// 조회 함수로 설정 로드 (빈 값은 미설정으로 취급)
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Self {
            upstream_base_url: non_empty("LIGHTER_BASE_URL").unwrap_or(defaults.upstream_base_url),
            l1_address: non_empty("LIGHTER_L1_ADDRESS"),
            ..defaults
        }
    }
}

/// 서버 상태
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<ServerConfig>,
    pub upstream: Arc<dyn UpstreamApi>,
    pub markets: MarketAggregator,
    pub orders: Arc<OrderLog>,
}

impl ServerState {
    pub fn new(config: ServerConfig, upstream: Arc<dyn UpstreamApi>) -> Self {
        Self {
            config: Arc::new(config),
            markets: MarketAggregator::new(upstream.clone()),
            upstream,
            orders: Arc::new(OrderLog::new()),
        }
    }
}

fn cors_layer(origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    match HeaderValue::from_str(origin) {
        Ok(origin) => cors.allow_origin(origin),
        Err(e) => {
            warn!("잘못된 CORS origin {:?}: {}", origin, e);
            cors
        }
    }
}

/// CORS preflight는 본문 없이 204로 응답
async fn preflight_no_content(request: Request, next: Next) -> Response {
    let is_preflight = request.method() == Method::OPTIONS
        && request
            .headers()
            .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD);

    let mut response = next.run(request).await;
    if is_preflight && response.status().is_success() {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}

/// 전체 라우터 생성
pub fn build_router(state: ServerState) -> Router {
    let cors = cors_layer(&state.config.cors_origin);

    create_api_router()
        .layer(cors)
        .layer(middleware::from_fn(preflight_no_content))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 서버 시작
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    info!("lighter-gateway 서버 시작 중... (upstream: {})", config.upstream_base_url);

    if config.l1_address.is_none() {
        warn!("LIGHTER_L1_ADDRESS 미설정: 계정 API는 400을 반환합니다");
    }

    let client = LighterClient::new(config.upstream_base_url.clone(), config.upstream_timeout)?;
    let bind_addr = config.bind_addr.clone();
    let app = build_router(ServerState::new(config, Arc::new(client)));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("{} 바인딩 실패", bind_addr))?;

    info!("서버가 성공적으로 시작되었습니다! http://{}", bind_addr);

    axum::serve(listener, app).await.context("HTTP 서버 실행 실패")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_config_defaults() {
        let config = ServerConfig::from_vars(|_| None);

        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.upstream_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.l1_address, None);
        assert_eq!(config.upstream_timeout, Duration::from_secs(5));
        assert_eq!(config.ws_interval, Duration::from_secs(2));
    }

    #[test]
    fn test_config_reads_env_and_ignores_empty_values() {
        let vars = HashMap::from([
            ("LIGHTER_BASE_URL", "http://127.0.0.1:9000"),
            ("LIGHTER_L1_ADDRESS", "  "),
        ]);
        let config = ServerConfig::from_vars(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.upstream_base_url, "http://127.0.0.1:9000");
        assert_eq!(config.l1_address, None);

        let vars = HashMap::from([("LIGHTER_L1_ADDRESS", "0xabc")]);
        let config = ServerConfig::from_vars(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.l1_address.as_deref(), Some("0xabc"));
        assert_eq!(config.upstream_base_url, DEFAULT_BASE_URL);
    }
}
