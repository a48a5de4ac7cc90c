// src/llm/provider/mod.rs
// LLM provider trait and request types shared by the live and scripted backends
use anyhow::Result;
use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;

use crate::session::{Message, Role};

pub mod openai;
pub mod scripted;
pub mod stream;

pub use openai::OpenAiProvider;
pub use scripted::ScriptedProvider;

/// Incrementally delivered assistant text
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Message format sent to providers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        let role = match message.role {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        Self {
            role: role.to_string(),
            content: message.content.clone(),
        }
    }
}

/// What the completion is for. Scripted backends pick their canned text by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPurpose {
    /// Next turn of the questionnaire
    Conversation,
    /// Final report generation
    Report,
}

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Full prompt, system preamble first
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub purpose: RequestPurpose,
    /// Questions already delivered in this session
    pub progress: usize,
}

/// Universal text-generation interface
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Single-shot completion
    async fn complete(&self, request: CompletionRequest) -> Result<String>;

    /// Streaming completion. Dropping the stream abandons the request.
    async fn stream(&self, request: CompletionRequest) -> Result<TextStream>;
}
