use std::time::Duration;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{sink::SinkExt, stream::StreamExt};
use log::{debug, error, info, warn};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::market::{MarketAggregator, MarketsSnapshot};
use crate::server::ServerState;

/// WebSocket 연결 핸들러 (origin 검사 없음)
pub async fn markets_websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<ServerState>,
) -> Response {
    let markets = state.markets.clone();
    let period = state.config.ws_interval;
    ws.on_upgrade(move |socket| stream_markets(socket, markets, period))
}

/// 주기마다 시장 스냅샷을 전송
///
/// 집계 실패, 전송 실패, 클라이언트 종료 중 하나라도 발생하면 루프를 끝내고
/// 연결을 닫습니다. 전송은 동기적으로 기다리므로 느린 클라이언트는 큐가 쌓이는
/// 대신 틱이 밀립니다.
async fn stream_markets(socket: WebSocket, markets: MarketAggregator, period: Duration) {
    let (mut sender, mut receiver) = socket.split();

    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!("시장 WebSocket 연결 (주기 {:?})", period);

    loop {
        tokio::select! {
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | None => {
                    debug!("클라이언트가 WebSocket 연결을 종료했습니다");
                    break;
                }
                Some(Err(e)) => {
                    debug!("WebSocket 수신 오류: {}", e);
                    break;
                }
                // 클라이언트 프레임은 무시
                Some(Ok(_)) => {}
            },
            _ = ticker.tick() => {
                let rows = match markets.load_merged_markets().await {
                    Ok(rows) => rows,
                    Err(e) => {
                        warn!("WebSocket 시장 집계 실패: {}", e);
                        break;
                    }
                };

                let payload = match serde_json::to_string(&MarketsSnapshot { markets: rows }) {
                    Ok(payload) => payload,
                    Err(e) => {
                        error!("시장 스냅샷 직렬화 실패: {}", e);
                        break;
                    }
                };

                if let Err(e) = sender.send(Message::Text(payload)).await {
                    debug!("WebSocket 전송 실패: {}", e);
                    break;
                }
            }
        }
    }

    let _ = sender.close().await;
    info!("시장 WebSocket 연결 종료");
}
