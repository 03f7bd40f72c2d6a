//! Lighter 무기한 선물 거래소용 트레이딩 UI 백엔드
//!
//! 여러 업스트림 REST 엔드포인트를 시장/계정/포지션/주문 리소스로 병합해
//! HTTP와 WebSocket으로 제공합니다.

pub mod account;
pub mod api;
pub mod market;
pub mod order_log;
pub mod server;
pub mod upstream;
