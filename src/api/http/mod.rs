// src/api/http/mod.rs

pub mod assessment;
pub mod chat;
pub mod handlers;
pub mod report;
pub mod router;

pub use chat::SESSION_ID_HEADER;
pub use router::create_router;
