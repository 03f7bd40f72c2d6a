//! HTTP / WebSocket API

pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod websocket;

pub use error::ApiError;
pub use routes::create_api_router;
