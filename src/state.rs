// src/state.rs
// Shared application state handed to every handler

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::{
    assessment::{AssessmentService, ModelSettings},
    config::AppConfig,
    llm::{LlmProvider, OpenAiProvider, ScriptedProvider},
    report::{MarkdownScoreParser, MarkdownTierFilter},
    session::{InMemorySessionStore, SessionStore},
};

#[derive(Clone)]
pub struct AppState {
    pub assessments: Arc<AssessmentService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(assessments: Arc<AssessmentService>, config: AppConfig) -> Self {
        Self {
            assessments,
            config: Arc::new(config),
        }
    }
}

/// Pick the provider the configuration asks for
pub fn build_provider(config: &AppConfig) -> Result<Arc<dyn LlmProvider>> {
    match (&config.openai_api_key, config.live_mode()) {
        (Some(key), true) => {
            let provider = OpenAiProvider::new(
                key.clone(),
                config.openai_base_url.clone(),
                config.model.clone(),
                Duration::from_secs(config.provider_timeout_secs),
            )?;
            info!("Using OpenAI provider with model {}", provider.model());
            Ok(Arc::new(provider))
        }
        _ => {
            info!("Using scripted provider (no live model)");
            Ok(Arc::new(ScriptedProvider::new()))
        }
    }
}

/// Wire the in-memory store, provider and report post-processing together
pub fn create_app_state(config: AppConfig) -> Result<AppState> {
    let provider = build_provider(&config)?;
    Ok(create_app_state_with(config, provider))
}

/// Same as [`create_app_state`] with an explicit provider
pub fn create_app_state_with(config: AppConfig, provider: Arc<dyn LlmProvider>) -> AppState {
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let settings = ModelSettings {
        conversation_temperature: config.assessment_temperature,
        report_temperature: config.report_temperature,
        report_max_tokens: config.report_max_tokens,
    };

    let assessments = Arc::new(AssessmentService::new(
        store,
        provider,
        Arc::new(MarkdownScoreParser::new()),
        Arc::new(MarkdownTierFilter::new()),
        settings,
    ));

    AppState::new(assessments, config)
}
