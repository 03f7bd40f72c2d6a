//! 시장 데이터 집계 모듈

pub mod aggregator;
pub mod model;

pub use aggregator::{merge_markets, price_map, MarketAggregator};
pub use model::{MarketRow, MarketsSnapshot};
