// src/llm/mod.rs
// Language model access: provider trait, OpenAI client and scripted fallback

pub mod provider;

pub use provider::{
    ChatMessage, CompletionRequest, LlmProvider, OpenAiProvider, RequestPurpose,
    ScriptedProvider, TextStream,
};
