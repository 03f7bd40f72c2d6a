use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::models::ErrorResponse;
use crate::order_log::OrderRejection;
use crate::upstream::UpstreamError;

/// API 에러 타입. 응답 본문은 항상 `{"error": "..."}` 입니다.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 필수 환경 설정 누락
    #[error("{0}")]
    MissingConfig(String),
    /// 업스트림 실패 (해당 엔드포인트에 치명적인 경우)
    #[error("{0}")]
    Upstream(String),
    /// 잘못된 JSON 또는 주문 검증 실패
    #[error("{0}")]
    BadRequest(String),
    #[error("method not allowed")]
    MethodNotAllowed,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingConfig(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

impl From<OrderRejection> for ApiError {
    fn from(err: OrderRejection) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
