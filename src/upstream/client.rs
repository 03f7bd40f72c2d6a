use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Method};

use crate::upstream::model::AccountByL1Response;
use crate::upstream::{UpstreamApi, UpstreamError};

/// 메인넷 기본 주소
pub const DEFAULT_BASE_URL: &str = "https://mainnet.zklighter.elliot.ai";

/// 요청당 기본 타임아웃
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const ORDER_BOOK_DETAILS_PATH: &str = "/api/v1/orderBookDetails";
const EXCHANGE_STATS_PATH: &str = "/api/v1/exchangeStats";
const FUNDING_RATES_PATH: &str = "/api/v1/funding-rates";
const ACCOUNT_PATH: &str = "/api/v1/account";

/// Lighter 공개 REST 클라이언트
///
/// 설정과 커넥션 풀 외에는 상태가 없으므로 `Arc`로 공유해 사용합니다.
/// 재시도나 레이트리밋 백오프는 하지 않습니다.
#[derive(Debug, Clone)]
pub struct LighterClient {
    base_url: String,
    http: Client,
}

impl LighterClient {
    /// 새 클라이언트 생성
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, UpstreamError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::Transport {
                method: "INIT".to_string(),
                path: base_url.clone(),
                message: e.to_string(),
            })?;

        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 요청을 보내고 2xx 응답 본문을 JSON 검증 후 그대로 반환
    async fn request_json(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<u8>, UpstreamError> {
        let transport_err = |e: reqwest::Error| UpstreamError::Transport {
            method: method.to_string(),
            path: path.to_string(),
            message: e.to_string(),
        };

        let mut request = self
            .http
            .request(method.clone(), format!("{}{}", self.base_url, path))
            .header("accept", "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(transport_err)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport_err)?;

        debug!("{} {} => {} ({} bytes)", method, path, status.as_u16(), body.len());

        if !status.is_success() {
            return Err(UpstreamError::Status {
                method: method.to_string(),
                path: path.to_string(),
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        serde_json::from_slice::<serde::de::IgnoredAny>(&body)
            .map_err(|e| UpstreamError::decode(path, e))?;

        Ok(body.to_vec())
    }
}

#[async_trait]
impl UpstreamApi for LighterClient {
    async fn order_book_details(&self) -> Result<Vec<u8>, UpstreamError> {
        self.request_json(Method::GET, ORDER_BOOK_DETAILS_PATH, &[]).await
    }

    async fn exchange_stats(&self) -> Result<Vec<u8>, UpstreamError> {
        self.request_json(Method::GET, EXCHANGE_STATS_PATH, &[]).await
    }

    async fn funding_rates(&self) -> Result<Vec<u8>, UpstreamError> {
        self.request_json(Method::GET, FUNDING_RATES_PATH, &[]).await
    }

    async fn account_by_l1(&self, address: &str) -> Result<AccountByL1Response, UpstreamError> {
        let raw = self
            .request_json(
                Method::GET,
                ACCOUNT_PATH,
                &[("by", "l1_address"), ("value", address)],
            )
            .await?;

        serde_json::from_slice(&raw).map_err(|e| UpstreamError::decode(ACCOUNT_PATH, e))
    }
}
