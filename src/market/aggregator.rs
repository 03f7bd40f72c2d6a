//! 시장 데이터 집계기
//!
//! 종목 메타데이터, 24시간 통계, 펀딩비 세 엔드포인트를 동시에 조회하여
//! 심볼 기준으로 하나의 시장 행으로 조인합니다.
//! 메타데이터 실패는 치명적이지만 통계/펀딩비 실패는 빈 테이블로 대체됩니다.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};

use crate::market::model::MarketRow;
use crate::upstream::model::{
    ExchangeStat, ExchangeStatsResponse, FundingRatesResponse, InstrumentDetail,
    OrderBookDetailsResponse,
};
use crate::upstream::{UpstreamApi, UpstreamError};

/// 시장 데이터 집계기
#[derive(Clone)]
pub struct MarketAggregator {
    upstream: Arc<dyn UpstreamApi>,
}

impl MarketAggregator {
    pub fn new(upstream: Arc<dyn UpstreamApi>) -> Self {
        Self { upstream }
    }

    /// 세 엔드포인트를 조인한 시장 목록 (업스트림 메타데이터 순서 유지)
    pub async fn load_merged_markets(&self) -> Result<Vec<MarketRow>, UpstreamError> {
        let (details, stats, funding) = tokio::join!(
            self.fetch_instruments(),
            self.fetch_stats_map(),
            self.fetch_funding_map(),
        );

        let details = details?;

        let stats = stats.unwrap_or_else(|e| {
            warn!("거래소 통계 조회 실패, 통계 없이 진행: {}", e);
            HashMap::new()
        });
        let funding = funding.unwrap_or_else(|e| {
            warn!("펀딩비 조회 실패, 펀딩비 없이 진행: {}", e);
            HashMap::new()
        });

        debug!(
            "시장 병합: 종목 {}개, 통계 {}개, 펀딩비 {}개",
            details.len(),
            stats.len(),
            funding.len()
        );

        Ok(merge_markets(details, &stats, &funding))
    }

    async fn fetch_instruments(&self) -> Result<Vec<InstrumentDetail>, UpstreamError> {
        let raw = self.upstream.order_book_details().await?;
        let resp: OrderBookDetailsResponse = serde_json::from_slice(&raw)
            .map_err(|e| UpstreamError::decode("/api/v1/orderBookDetails", e))?;
        Ok(resp.order_book_details)
    }

    async fn fetch_stats_map(&self) -> Result<HashMap<String, ExchangeStat>, UpstreamError> {
        let raw = self.upstream.exchange_stats().await?;
        let resp: ExchangeStatsResponse = serde_json::from_slice(&raw)
            .map_err(|e| UpstreamError::decode("/api/v1/exchangeStats", e))?;

        Ok(resp
            .order_book_stats
            .into_iter()
            .map(|stat| (stat.symbol.clone(), stat))
            .collect())
    }

    async fn fetch_funding_map(&self) -> Result<HashMap<String, f64>, UpstreamError> {
        let raw = self.upstream.funding_rates().await?;
        let resp: FundingRatesResponse = serde_json::from_slice(&raw)
            .map_err(|e| UpstreamError::decode("/api/v1/funding-rates", e))?;

        Ok(resp
            .funding_rates
            .into_iter()
            .map(|row| (row.symbol, row.rate))
            .collect())
    }
}

/// 메타데이터 행마다 통계와 펀딩비를 붙이고 파생 필드를 계산
pub fn merge_markets(
    details: Vec<InstrumentDetail>,
    stats: &HashMap<String, ExchangeStat>,
    funding: &HashMap<String, f64>,
) -> Vec<MarketRow> {
    details
        .into_iter()
        .map(|detail| {
            let mut row = MarketRow::from(detail);

            if let Some(stat) = stats.get(&row.symbol) {
                row.index_price = stat.last_trade_price;
                row.mark_price = stat.last_trade_price;
                row.change_24h_pct = stat.daily_price_change;
                row.volume_24h_usd = stat.daily_quote_token_volume;
            }

            let price = row.effective_price();
            row.open_interest_usd = if price != 0.0 {
                row.open_interest * price
            } else {
                0.0
            };

            if let Some(rate) = funding.get(&row.symbol) {
                row.funding_rate_8h = *rate;
            }

            row
        })
        .collect()
}

/// 심볼 -> 가격 맵 (가격이 0인 심볼은 제외)
pub fn price_map(rows: &[MarketRow]) -> HashMap<String, f64> {
    rows.iter()
        .filter_map(|row| {
            let price = row.effective_price();
            (price != 0.0).then(|| (row.symbol.clone(), price))
        })
        .collect()
}
