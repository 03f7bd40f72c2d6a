//! Lighter 업스트림 REST 연동
//!
//! 시장 데이터 엔드포인트는 검증된 JSON 바이트를 그대로 돌려주고,
//! 계정 엔드포인트만 타입으로 디코딩해 돌려줍니다.

pub mod client;
pub mod model;

pub use client::{LighterClient, DEFAULT_BASE_URL};
pub use model::AccountByL1Response;

use async_trait::async_trait;

/// 업스트림 호출 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("{method} {path}: {message}")]
    Transport {
        method: String,
        path: String,
        message: String,
    },
    #[error("{method} {path} => {status}: {body}")]
    Status {
        method: String,
        path: String,
        status: u16,
        body: String,
    },
    #[error("{path} 응답 디코딩 실패: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl UpstreamError {
    pub fn decode(path: &str, source: serde_json::Error) -> Self {
        UpstreamError::Decode {
            path: path.to_string(),
            source,
        }
    }
}

/// 업스트림 API 트레이트
///
/// 요청 범위 취소는 반환된 future를 drop하는 것으로 전파됩니다.
/// 구현체는 여러 핸들러에서 동시에 공유됩니다.
#[async_trait]
pub trait UpstreamApi: Send + Sync {
    /// `GET /api/v1/orderBookDetails`
    async fn order_book_details(&self) -> Result<Vec<u8>, UpstreamError>;
    /// `GET /api/v1/exchangeStats`
    async fn exchange_stats(&self) -> Result<Vec<u8>, UpstreamError>;
    /// `GET /api/v1/funding-rates`
    async fn funding_rates(&self) -> Result<Vec<u8>, UpstreamError>;
    /// `GET /api/v1/account?by=l1_address&value=<address>`
    async fn account_by_l1(&self, address: &str) -> Result<AccountByL1Response, UpstreamError>;
}
