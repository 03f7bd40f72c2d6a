//! Lighter REST 응답 타입
//!
//! 시장 데이터 엔드포인트의 숫자 필드는 JSON 숫자 또는 숫자 문자열로
//! 내려올 수 있으므로 두 형태를 모두 받아들입니다.
//! 파싱할 수 없는 값은 필드 하나 때문에 응답 전체가 실패하지 않도록 0으로 둡니다.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// 숫자 문자열 파싱 (실패하거나 유한하지 않으면 0)
pub fn parse_decimal(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// 숫자 또는 숫자 문자열을 f64로 역직렬화 (그 외 값은 0)
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(value) if value.is_finite() => value,
        NumberOrText::Number(_) => 0.0,
        NumberOrText::Text(text) => parse_decimal(&text),
        NumberOrText::Other(_) => 0.0,
    })
}

/// null을 기본값으로 역직렬화 (계정 응답 필드)
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 숫자 또는 문자열을 문자열로 역직렬화 (수수료 필드)
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Number(serde_json::Number),
        Other(IgnoredAny),
    }

    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(text) => text,
        TextOrNumber::Number(number) => number.to_string(),
        TextOrNumber::Other(_) => String::new(),
    })
}

/// 종목 메타데이터 (`/api/v1/orderBookDetails`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentDetail {
    pub symbol: String,
    #[serde(default)]
    pub market_id: i64,
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub taker_fee: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub maker_fee: String,
    /// 기초자산 단위 미결제약정
    #[serde(default, deserialize_with = "lenient_f64")]
    pub open_interest: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderBookDetailsResponse {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub order_book_details: Vec<InstrumentDetail>,
}

/// 24시간 통계 (`/api/v1/exchangeStats`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExchangeStat {
    pub symbol: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub last_trade_price: f64,
    /// 퍼센트 단위
    #[serde(default, deserialize_with = "lenient_f64")]
    pub daily_price_change: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub daily_base_token_volume: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub daily_quote_token_volume: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeStatsResponse {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub order_book_stats: Vec<ExchangeStat>,
}

/// 펀딩비 (`/api/v1/funding-rates`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FundingRateRow {
    #[serde(default)]
    pub market_id: i64,
    #[serde(default)]
    pub exchange: String,
    pub symbol: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rate: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FundingRatesResponse {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub funding_rates: Vec<FundingRateRow>,
}

/// 서브 계정의 포지션. 금액/수량은 정밀도 보존을 위해 문자열로 내려옵니다.
///
/// 계정 응답의 모든 필드는 누락되거나 null이면 기본값이 됩니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountPosition {
    #[serde(deserialize_with = "null_as_default")]
    pub market_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub symbol: String,
    #[serde(deserialize_with = "null_as_default")]
    pub initial_margin_fraction: String,
    #[serde(deserialize_with = "null_as_default")]
    pub open_order_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub pending_order_count: i64,
    /// +1 롱, -1 숏
    #[serde(deserialize_with = "null_as_default")]
    pub sign: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub position: String,
    #[serde(deserialize_with = "null_as_default")]
    pub avg_entry_price: String,
    #[serde(deserialize_with = "null_as_default")]
    pub position_value: String,
    #[serde(deserialize_with = "null_as_default")]
    pub unrealized_pnl: String,
    #[serde(deserialize_with = "null_as_default")]
    pub realized_pnl: String,
    #[serde(deserialize_with = "null_as_default")]
    pub liquidation_price: String,
    #[serde(deserialize_with = "null_as_default")]
    pub margin_mode: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub allocated_margin: String,
}

/// L1 주소 아래의 서브 계정
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    #[serde(deserialize_with = "null_as_default")]
    pub code: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub account_type: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub index: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub l1_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pending_order_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub available_balance: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub collateral: String,
    #[serde(deserialize_with = "null_as_default")]
    pub account_index: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub positions: Vec<AccountPosition>,
    #[serde(deserialize_with = "null_as_default")]
    pub total_asset_value: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cross_asset_value: String,
}

/// `/api/v1/account?by=l1_address&value=...` 응답
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountByL1Response {
    #[serde(deserialize_with = "null_as_default")]
    pub code: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub total: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub accounts: Vec<Account>,
}
