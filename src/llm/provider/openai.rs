// src/llm/provider/openai.rs
// OpenAI Chat Completions provider (single-shot and streaming)

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client};
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

use super::stream::text_stream;
use super::{CompletionRequest, LlmProvider, TextStream};

pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OpenAiProvider {
    pub fn new(
        api_key: String,
        base_url: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            timeout,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    fn body(&self, request: &CompletionRequest, stream: bool) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": request.messages,
            "temperature": request.temperature,
        });
        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        if stream {
            body["stream"] = json!(true);
        }
        body
    }

    fn transport_error(&self, e: reqwest::Error) -> anyhow::Error {
        if e.is_timeout() {
            anyhow!("OpenAI request timed out after {}s", self.timeout.as_secs())
        } else {
            anyhow!("OpenAI request failed: {}", e)
        }
    }

    async fn send(&self, body: &Value, accept: &str) -> Result<reqwest::Response> {
        let req = self
            .client
            .post(self.endpoint())
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, accept)
            // Covers the whole exchange, including a streamed body
            .timeout(self.timeout)
            .json(body);

        let response = req.send().await.map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_else(|_| "<no body>".into());
            error!("OpenAI API error {}: {}", status, error_text);
            return Err(anyhow!("OpenAI API error {}: {}", status, error_text));
        }

        Ok(response)
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let start = Instant::now();
        let body = self.body(&request, false);

        debug!(
            "OpenAI request: model={}, messages={}, purpose={:?}",
            self.model,
            request.messages.len(),
            request.purpose
        );

        let response = self.send(&body, "application/json").await?;
        let raw: Value = response.json().await.map_err(|e| self.transport_error(e))?;

        let content = raw["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or_default()
            .to_string();

        info!(
            "OpenAI completion: {} chars in {}ms (finish_reason: {})",
            content.len(),
            start.elapsed().as_millis(),
            raw["choices"][0]["finish_reason"].as_str().unwrap_or("unknown")
        );

        Ok(content)
    }

    async fn stream(&self, request: CompletionRequest) -> Result<TextStream> {
        let body = self.body(&request, true);

        debug!(
            "OpenAI streaming request: model={}, messages={}",
            self.model,
            request.messages.len()
        );

        let response = self.send(&body, "text/event-stream").await?;
        Ok(text_stream(response.bytes_stream()))
    }
}
