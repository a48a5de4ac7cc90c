// src/llm/provider/scripted.rs
// Deterministic stand-in for the live model: replays the canned questionnaire

use anyhow::Result;
use async_trait::async_trait;

use super::{CompletionRequest, LlmProvider, RequestPurpose, TextStream};
use crate::assessment::script::{scripted_response, SCRIPTED_REPORT};

#[derive(Debug, Default, Clone)]
pub struct ScriptedProvider;

impl ScriptedProvider {
    pub fn new() -> Self {
        Self
    }

    fn reply(request: &CompletionRequest) -> &'static str {
        match request.purpose {
            RequestPurpose::Conversation => scripted_response(request.progress),
            RequestPurpose::Report => SCRIPTED_REPORT,
        }
    }
}

/// Split text into word-sized fragments, keeping the whitespace so the
/// fragments concatenate back to the original
pub(crate) fn fragments(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        current.push(ch);
        if ch.is_whitespace() {
            parts.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        Ok(Self::reply(&request).to_string())
    }

    async fn stream(&self, request: CompletionRequest) -> Result<TextStream> {
        let parts = fragments(Self::reply(&request));
        Ok(Box::pin(futures::stream::iter(parts.into_iter().map(Ok))))
    }
}
