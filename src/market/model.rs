use serde::{Deserialize, Serialize};

use crate::upstream::model::InstrumentDetail;

/// 심볼 단위로 조인된 시장 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRow {
    pub symbol: String,
    pub market_id: i64,
    pub status: String,
    pub taker_fee: String,
    pub maker_fee: String,
    pub open_interest: f64,

    pub index_price: f64,
    pub mark_price: f64,
    pub change_24h_pct: f64,

    pub open_interest_usd: f64,
    pub volume_24h_usd: f64,
    pub funding_rate_8h: f64,
}

impl MarketRow {
    /// 마크 가격, 없으면 인덱스 가격
    pub fn effective_price(&self) -> f64 {
        if self.mark_price != 0.0 {
            self.mark_price
        } else {
            self.index_price
        }
    }
}

impl From<InstrumentDetail> for MarketRow {
    fn from(detail: InstrumentDetail) -> Self {
        Self {
            symbol: detail.symbol,
            market_id: detail.market_id,
            status: detail.status,
            taker_fee: detail.taker_fee,
            maker_fee: detail.maker_fee,
            open_interest: detail.open_interest,
            index_price: 0.0,
            mark_price: 0.0,
            change_24h_pct: 0.0,
            open_interest_usd: 0.0,
            volume_24h_usd: 0.0,
            funding_rate_8h: 0.0,
        }
    }
}

/// WebSocket 시장 스냅샷 메시지
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketsSnapshot {
    pub markets: Vec<MarketRow>,
}
