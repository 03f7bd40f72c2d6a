use serde::{Deserialize, Serialize};

use crate::order_log::OrderIntent;

/// `GET /api/status` 응답
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub network_id: i64,
    pub status: u16,
    pub timestamp: i64,
}

/// 주문 제출 응답
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub order_id: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    /// 제출된 주문 의도 그대로
    pub request: OrderIntent,
}

/// API 오류 응답
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
