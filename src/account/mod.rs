//! 계정 요약 및 포지션 투영 모듈

pub mod model;
pub mod projector;

pub use model::{AccountSummary, PositionRow, PositionSide, PositionsResponse};
pub use projector::{flatten_positions, summarize};
