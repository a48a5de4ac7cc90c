// src/assessment/mod.rs
// Assessment domain: prompts, canned script, validation and turn orchestration

pub mod error;
pub mod orchestrator;
pub mod prompts;
pub mod script;
pub mod validation;

pub use error::{AssessmentError, AssessmentResult};
pub use orchestrator::{
    AssessmentService, GeneratedReport, ModelSettings, ReportView, TurnEvent, TurnOutcome,
    TurnResult, TurnStream,
};
pub use validation::ClientInfoInput;
