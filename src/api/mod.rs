// src/api/mod.rs
// HTTP surface of the service

pub mod error;
pub mod http;
pub mod types;

pub use error::{ApiError, ApiResult};
pub use http::create_router;
