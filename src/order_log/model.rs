//! 주문 접수 모델
//!
//! 클라이언트가 제출하는 주문 의도와, 메모리 주문 로그에 쌓이는
//! 주문 항목을 정의합니다.

use serde::{Deserialize, Serialize};

/// 매수/매도 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// 매수 주문
    Buy,
    /// 매도 주문
    Sell,
}

impl Side {
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "buy" => Some(Side::Buy),
            "sell" => Some(Side::Sell),
            _ => None,
        }
    }
}

/// 주문 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// 시장가 주문
    Market,
    /// 지정가 주문 - 양수 가격 필수
    Limit,
}

impl OrderType {
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "market" => Some(OrderType::Market),
            "limit" => Some(OrderType::Limit),
            _ => None,
        }
    }
}

/// 주문 상태 (현재는 접수 시 `Open`에서 변하지 않음)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Filled,
    Cancelled,
}

/// 클라이언트 주문 의도 (`POST /api/trade/order` 본문)
///
/// `side`/`type`은 검증 단계에서 규칙별 메시지를 돌려주기 위해
/// 문자열 그대로 받습니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderIntent {
    /// 거래 대상 심볼 (예: "BTC", "ETH")
    #[serde(default)]
    pub symbol: String,
    /// "buy" | "sell"
    #[serde(default)]
    pub side: String,
    /// "market" | "limit"
    #[serde(rename = "type", default)]
    pub order_type: String,
    /// 지정가 주문 가격
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// USD 기준 주문 크기
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_usd: Option<f64>,
    /// 계약 수 기준 주문 크기
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_contracts: Option<f64>,
    #[serde(default)]
    pub leverage: f64,
    #[serde(default)]
    pub reduce_only: bool,
    #[serde(default)]
    pub client_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<f64>,
}

/// 주문 로그 항목
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLogEntry {
    /// 합성 주문 ID (`dev-<나노초>`)
    pub order_id: String,
    pub symbol: String,
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_usd: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_contracts: Option<f64>,
    pub leverage: f64,
    pub reduce_only: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub client_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<f64>,
    /// 접수 시각 (Unix 초)
    pub created_at_epoch: i64,
}

/// `GET /api/account/orders` 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersResponse {
    pub orders: Vec<OrderLogEntry>,
}
