// src/report/mod.rs
// Report post-processing: score extraction and tier views

pub mod parser;
pub mod tier;

pub use parser::{MarkdownScoreParser, ReportParser};
pub use tier::{MarkdownTierFilter, TierFilter};
