//! 주문 접수 (스텁)
//!
//! 주문 의도를 검증하고 합성 ID를 붙여 프로세스 전역 주문 로그에 추가합니다.
//! 업스트림으로 주문을 보내지 않으며, 접수된 주문은 `open` 상태로 남습니다.

use chrono::Utc;
use log::info;
use tokio::sync::Mutex;

use crate::order_log::model::{OrderIntent, OrderLogEntry, OrderStatus, OrderType, Side};

/// 주문 검증 실패 사유
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderRejection {
    #[error("symbol is required")]
    MissingSymbol,
    #[error("side must be 'buy' or 'sell'")]
    InvalidSide,
    #[error("type must be 'market' or 'limit'")]
    InvalidType,
    #[error("limit orders require positive price")]
    MissingLimitPrice,
    #[error("size_usd or size_contracts must be > 0")]
    MissingSize,
}

fn is_positive(value: Option<f64>) -> bool {
    value.map_or(false, |v| v > 0.0)
}

/// 규칙을 순서대로 검사하고 첫 번째 실패를 반환
pub fn validate(intent: &OrderIntent) -> Result<(Side, OrderType), OrderRejection> {
    if intent.symbol.is_empty() {
        return Err(OrderRejection::MissingSymbol);
    }
    let side = Side::parse(&intent.side).ok_or(OrderRejection::InvalidSide)?;
    let order_type = OrderType::parse(&intent.order_type).ok_or(OrderRejection::InvalidType)?;

    if order_type == OrderType::Limit && !is_positive(intent.price) {
        return Err(OrderRejection::MissingLimitPrice);
    }
    if !is_positive(intent.size_usd) && !is_positive(intent.size_contracts) {
        return Err(OrderRejection::MissingSize);
    }

    Ok((side, order_type))
}

#[derive(Default)]
struct LogInner {
    entries: Vec<OrderLogEntry>,
    last_id_nanos: i64,
}

/// 프로세스 전역 주문 로그
///
/// 추가와 스냅샷 복사 모두 같은 뮤텍스 아래에서 수행되므로
/// 동시 제출은 선형화되고 스냅샷은 항상 접두사 일관성을 가집니다.
/// 보존 정책은 없습니다.
#[derive(Default)]
pub struct OrderLog {
    inner: Mutex<LogInner>,
}

impl OrderLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 주문 접수
    pub async fn submit(&self, intent: OrderIntent) -> Result<OrderLogEntry, OrderRejection> {
        let (side, order_type) = validate(&intent)?;

        let mut inner = self.inner.lock().await;

        let now = Utc::now();
        // 같은 나노초에 들어온 주문도 ID가 겹치지 않도록 단조 증가 보장
        let nanos = now
            .timestamp_nanos_opt()
            .unwrap_or_default()
            .max(inner.last_id_nanos + 1);
        inner.last_id_nanos = nanos;

        let entry = OrderLogEntry {
            order_id: format!("dev-{}", nanos),
            symbol: intent.symbol,
            side,
            order_type,
            status: OrderStatus::Open,
            price: intent.price,
            size_usd: intent.size_usd,
            size_contracts: intent.size_contracts,
            leverage: intent.leverage,
            reduce_only: intent.reduce_only,
            client_id: intent.client_id,
            stop_loss: intent.stop_loss,
            take_profit: intent.take_profit,
            created_at_epoch: now.timestamp(),
        };
        inner.entries.push(entry.clone());

        info!(
            "신규 주문 접수 (스텁): {} {} {:?} {:?} (누적 {}건)",
            entry.order_id,
            entry.symbol,
            entry.side,
            entry.order_type,
            inner.entries.len()
        );

        Ok(entry)
    }

    /// 현재 로그의 복사본
    pub async fn snapshot(&self) -> Vec<OrderLogEntry> {
        self.inner.lock().await.entries.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn market_intent(symbol: &str) -> OrderIntent {
        OrderIntent {
            symbol: symbol.to_string(),
            side: "buy".to_string(),
            order_type: "market".to_string(),
            size_usd: Some(100.0),
            leverage: 5.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_validation_order_first_failure_wins() {
        let empty = OrderIntent::default();
        assert_eq!(validate(&empty), Err(OrderRejection::MissingSymbol));

        let mut intent = OrderIntent {
            symbol: "BTC".to_string(),
            side: "hold".to_string(),
            order_type: "stop".to_string(),
            ..Default::default()
        };
        assert_eq!(validate(&intent), Err(OrderRejection::InvalidSide));

        intent.side = "sell".to_string();
        assert_eq!(validate(&intent), Err(OrderRejection::InvalidType));

        intent.order_type = "limit".to_string();
        assert_eq!(validate(&intent), Err(OrderRejection::MissingLimitPrice));

        intent.price = Some(0.0);
        assert_eq!(validate(&intent), Err(OrderRejection::MissingLimitPrice));

        intent.price = Some(50_000.0);
        assert_eq!(validate(&intent), Err(OrderRejection::MissingSize));

        intent.size_usd = Some(-1.0);
        intent.size_contracts = Some(0.5);
        assert_eq!(validate(&intent), Ok((Side::Sell, OrderType::Limit)));
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            OrderRejection::MissingLimitPrice.to_string(),
            "limit orders require positive price"
        );
        assert_eq!(
            OrderRejection::MissingSize.to_string(),
            "size_usd or size_contracts must be > 0"
        );
    }

    #[tokio::test]
    async fn test_submit_appends_open_order() {
        let log = OrderLog::new();
        let entry = log.submit(market_intent("BTC")).await.unwrap();

        assert!(entry.order_id.starts_with("dev-"));
        assert!(entry.order_id["dev-".len()..].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(entry.status, OrderStatus::Open);
        assert_eq!(entry.side, Side::Buy);
        assert_eq!(entry.order_type, OrderType::Market);
        assert_eq!(entry.size_usd, Some(100.0));
        assert!(entry.created_at_epoch > 0);

        assert_eq!(log.snapshot().await, vec![entry]);
    }

    #[tokio::test]
    async fn test_rejected_order_is_not_logged() {
        let log = OrderLog::new();
        let result = log.submit(OrderIntent::default()).await;

        assert_eq!(result, Err(OrderRejection::MissingSymbol));
        assert_eq!(log.len().await, 0);
    }

    #[tokio::test]
    async fn test_concurrent_submits_get_unique_ids() {
        let log = Arc::new(OrderLog::new());
        let mut handles = Vec::new();

        for i in 0..32 {
            let log = log.clone();
            handles.push(tokio::spawn(async move {
                log.submit(market_intent(&format!("SYM{}", i))).await.unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let entries = log.snapshot().await;
        assert_eq!(entries.len(), 32);

        let ids: Vec<i64> = entries
            .iter()
            .map(|e| e.order_id["dev-".len()..].parse().unwrap())
            .collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }
}
