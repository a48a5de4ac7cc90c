// src/lib.rs

pub mod api;
pub mod assessment;
pub mod config;
pub mod llm;
pub mod report;
pub mod session;
pub mod state;

pub use config::AppConfig;
pub use state::AppState;
