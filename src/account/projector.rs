//! 계정 응답 투영
//!
//! 업스트림의 중첩된 계정 응답에서 계정 요약과 포지션 목록을 계산합니다.
//! 업스트림 숫자 문자열은 f64로 파싱하며, 파싱 실패(빈 문자열 포함)는
//! 조용히 0으로 취급합니다.

use std::collections::HashMap;

use crate::account::model::{AccountSummary, PositionRow, PositionSide};
use crate::upstream::model::{parse_decimal, AccountByL1Response};

/// 모든 서브 계정을 하나의 논리 계정으로 합산
pub fn summarize(resp: &AccountByL1Response) -> AccountSummary {
    let mut balance = 0.0;
    let mut margin_used = 0.0;

    for account in &resp.accounts {
        balance += parse_decimal(&account.collateral);
        for position in &account.positions {
            margin_used += parse_decimal(&position.allocated_margin);
        }
    }

    let equity = balance;
    let effective_leverage = if margin_used > 0.0 {
        equity / margin_used
    } else {
        0.0
    };

    AccountSummary {
        account_id: String::new(),
        balance_usd: balance,
        equity_usd: equity,
        unrealized_pnl_usd: 0.0,
        realized_pnl_usd: 0.0,
        margin_used_usd: margin_used,
        margin_available_usd: equity - margin_used,
        effective_leverage,
        sharpe_30d: 0.0,
    }
}

/// 수량이 0이 아닌 포지션을 서브 계정 순서, 포지션 순서대로 평탄화
///
/// 마크 가격은 `prices` -> `position_value / position` -> 0 순으로 결정됩니다.
pub fn flatten_positions(
    resp: &AccountByL1Response,
    prices: &HashMap<String, f64>,
) -> Vec<PositionRow> {
    resp.accounts
        .iter()
        .flat_map(|account| account.positions.iter())
        .filter_map(|position| {
            let quantity = parse_decimal(&position.position);
            if quantity == 0.0 {
                return None;
            }

            let position_value = parse_decimal(&position.position_value);
            let margin_fraction = parse_decimal(&position.initial_margin_fraction);

            let leverage = if margin_fraction > 0.0 {
                100.0 / margin_fraction
            } else {
                0.0
            };

            let mark_price = match prices.get(&position.symbol) {
                Some(price) if *price != 0.0 => *price,
                _ => position_value / quantity,
            };

            Some(PositionRow {
                symbol: position.symbol.clone(),
                side: PositionSide::from_sign(position.sign),
                size_usd: position_value.abs(),
                size_contracts: quantity.abs(),
                entry_price: parse_decimal(&position.avg_entry_price),
                mark_price,
                leverage,
                unrealized_pnl_usd: parse_decimal(&position.unrealized_pnl),
                realized_pnl_usd: parse_decimal(&position.realized_pnl),
                margin_used_usd: parse_decimal(&position.allocated_margin),
            })
        })
        .collect()
}
