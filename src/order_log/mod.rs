//! 주문 접수 및 메모리 주문 로그

pub mod intake;
pub mod model;

pub use intake::{validate, OrderLog, OrderRejection};
pub use model::{OrderIntent, OrderLogEntry, OrderStatus, OrderType, OrdersResponse, Side};
