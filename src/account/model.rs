use serde::{Deserialize, Serialize};

/// 포지션 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    Long,
    Short,
}

impl PositionSide {
    /// 업스트림 부호 (음수면 숏)
    pub fn from_sign(sign: i32) -> Self {
        if sign < 0 {
            PositionSide::Short
        } else {
            PositionSide::Long
        }
    }
}

/// 계정 요약
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub account_id: String,
    /// 모든 서브 계정 담보 합계
    pub balance_usd: f64,
    /// 미실현 손익은 아직 반영하지 않으므로 잔고와 동일
    pub equity_usd: f64,
    pub unrealized_pnl_usd: f64,
    pub realized_pnl_usd: f64,
    pub margin_used_usd: f64,
    pub margin_available_usd: f64,
    pub effective_leverage: f64,
    pub sharpe_30d: f64,
}

impl AccountSummary {
    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = account_id.into();
        self
    }
}

/// 평탄화된 포지션 행
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRow {
    pub symbol: String,
    pub side: PositionSide,
    pub size_usd: f64,
    pub size_contracts: f64,
    pub entry_price: f64,
    pub mark_price: f64,
    pub leverage: f64,
    pub unrealized_pnl_usd: f64,
    pub realized_pnl_usd: f64,
    pub margin_used_usd: f64,
}

/// `GET /api/account/positions` 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionsResponse {
    pub positions: Vec<PositionRow>,
}
