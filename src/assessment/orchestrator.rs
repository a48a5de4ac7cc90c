// src/assessment/orchestrator.rs
// Drives one assessment: chat turns, progress, completion and the report lifecycle

use chrono::Utc;
use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::OwnedMutexGuard;
use tracing::{error, info, warn};

use super::error::{AssessmentError, AssessmentResult};
use super::prompts::{is_completion, REPORT_INSTRUCTION, SYSTEM_PROMPT};
use super::validation::ClientInfoInput;
use crate::llm::{ChatMessage, CompletionRequest, LlmProvider, RequestPurpose};
use crate::report::{ReportParser, TierFilter};
use crate::session::{
    Message, ReportTier, Scores, Session, SessionLocks, SessionPatch, SessionStatus, SessionStore,
};

/// Minimum history length before a report may be requested explicitly
pub const MIN_MESSAGES_FOR_REPORT: usize = 10;

#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub conversation_temperature: f32,
    pub report_temperature: f32,
    pub report_max_tokens: u32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            conversation_temperature: 0.7,
            report_temperature: 0.5,
            report_max_tokens: 4000,
        }
    }
}

/// What a finished assistant turn means for the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The questionnaire goes on
    Continue,
    /// The reply carried the final report
    ReportReady,
}

#[derive(Debug, Clone)]
pub struct TurnResult {
    pub session: Session,
    pub reply: String,
    pub outcome: TurnOutcome,
}

#[derive(Debug, Clone)]
pub enum TurnEvent {
    Delta(String),
    Finished { session: Session, outcome: TurnOutcome },
}

pub type TurnStream = Pin<Box<dyn Stream<Item = AssessmentResult<TurnEvent>> + Send>>;

#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub session: Session,
    pub report: String,
    pub scores: Scores,
}

/// A stored report as the session's tier is allowed to see it
#[derive(Debug, Clone)]
pub struct ReportView {
    pub session: Session,
    pub report: String,
    /// Unfiltered text, only for the pro tier
    pub full_report: Option<String>,
    pub tier: ReportTier,
    pub can_upgrade: bool,
}

/// Turn state held between the user message being recorded and the reply landing
struct PreparedTurn {
    session_id: String,
    request: CompletionRequest,
    guard: OwnedMutexGuard<()>,
}

pub struct AssessmentService {
    store: Arc<dyn SessionStore>,
    provider: Arc<dyn LlmProvider>,
    parser: Arc<dyn ReportParser>,
    tiers: Arc<dyn TierFilter>,
    locks: SessionLocks,
    settings: ModelSettings,
}

impl AssessmentService {
    pub fn new(
        store: Arc<dyn SessionStore>,
        provider: Arc<dyn LlmProvider>,
        parser: Arc<dyn ReportParser>,
        tiers: Arc<dyn TierFilter>,
        settings: ModelSettings,
    ) -> Self {
        Self {
            store,
            provider,
            parser,
            tiers,
            locks: SessionLocks::new(),
            settings,
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    // ========================================================================
    // Session lifecycle
    // ========================================================================

    /// Validate the profile and open a session ready for its first question
    pub async fn start(&self, input: ClientInfoInput) -> AssessmentResult<Session> {
        let client_info = input.into_client_info()?;
        let session = self.store.create().await;

        let session = self
            .store
            .update(
                &session.id,
                SessionPatch {
                    client_info: Some(client_info),
                    status: Some(SessionStatus::InProgress),
                    ..Default::default()
                },
            )
            .await
            .ok_or_else(AssessmentError::session_not_found)?;

        info!("Assessment {} started", session.id);
        Ok(session)
    }

    pub async fn get(&self, session_id: &str) -> AssessmentResult<Session> {
        self.store
            .get(session_id)
            .await
            .ok_or_else(AssessmentError::session_not_found)
    }

    /// All sessions, newest first
    pub async fn list(&self) -> Vec<Session> {
        let mut sessions = self.store.list().await;
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sessions
    }

    pub async fn update_client_info(
        &self,
        session_id: &str,
        input: ClientInfoInput,
    ) -> AssessmentResult<Session> {
        let session = self.get(session_id).await?;
        // A session opened from chat has no profile yet: the patch must supply one
        let client_info = match session.client_info {
            Some(existing) => input.merge_into(existing)?,
            None => input.into_client_info()?,
        };

        self.store
            .update(
                session_id,
                SessionPatch {
                    client_info: Some(client_info),
                    ..Default::default()
                },
            )
            .await
            .ok_or_else(AssessmentError::session_not_found)
    }

    pub async fn delete(&self, session_id: &str) -> AssessmentResult<()> {
        if !self.store.delete(session_id).await {
            return Err(AssessmentError::session_not_found());
        }
        self.locks.remove(session_id).await;
        info!("Assessment {} deleted", session_id);
        Ok(())
    }

    /// Unlock the full report. Requires a stored report and a free session.
    pub async fn upgrade(&self, session_id: &str) -> AssessmentResult<Session> {
        let session = self.get(session_id).await?;

        if session.report_tier == ReportTier::Pro {
            return Err(AssessmentError::Precondition("Already upgraded to Pro".to_string()));
        }
        if !session.has_report() {
            return Err(AssessmentError::Precondition("Report not yet generated".to_string()));
        }

        let session = self
            .store
            .update(
                session_id,
                SessionPatch {
                    report_tier: Some(ReportTier::Pro),
                    ..Default::default()
                },
            )
            .await
            .ok_or_else(AssessmentError::session_not_found)?;

        info!("Assessment {} upgraded to pro", session_id);
        Ok(session)
    }

    // ========================================================================
    // Chat turns
    // ========================================================================

    /// Run one turn and wait for the whole reply
    pub async fn chat_sync(
        &self,
        session_id: Option<&str>,
        message: &str,
    ) -> AssessmentResult<TurnResult> {
        let PreparedTurn {
            session_id,
            request,
            guard: _guard,
        } = self.begin_turn(session_id, message).await?;

        let reply = self.provider.complete(request).await.map_err(|e| {
            error!("Provider {} failed on session {}: {:#}", self.provider.name(), session_id, e);
            AssessmentError::Provider(e)
        })?;

        let (session, outcome) = self.finish_turn(&session_id, reply.clone()).await?;
        Ok(TurnResult {
            session,
            reply,
            outcome,
        })
    }

    /// Run one turn as a stream of reply fragments followed by a `Finished` event.
    ///
    /// Returns the session id up front so it can be announced before the first
    /// fragment. The session stays locked until the stream ends or is dropped;
    /// dropping it early discards the partial reply and leaves progress as it was.
    pub async fn chat_stream(
        self: &Arc<Self>,
        session_id: Option<&str>,
        message: &str,
    ) -> AssessmentResult<(String, TurnStream)> {
        let PreparedTurn {
            session_id,
            request,
            guard,
        } = self.begin_turn(session_id, message).await?;

        let mut fragments = self.provider.stream(request).await.map_err(|e| {
            error!("Provider {} failed on session {}: {:#}", self.provider.name(), session_id, e);
            AssessmentError::Provider(e)
        })?;

        let service = Arc::clone(self);
        let id = session_id.clone();

        let stream = async_stream::stream! {
            let _guard = guard;
            let mut reply = String::new();
            let mut failed = false;

            while let Some(item) = fragments.next().await {
                match item {
                    Ok(text) => {
                        if text.is_empty() {
                            continue;
                        }
                        reply.push_str(&text);
                        yield Ok(TurnEvent::Delta(text));
                    }
                    Err(e) => {
                        error!("Stream from {} failed on session {}: {:#}", service.provider.name(), id, e);
                        failed = true;
                        yield Err(AssessmentError::Provider(e));
                        break;
                    }
                }
            }

            if !failed {
                match service.finish_turn(&id, reply).await {
                    Ok((session, outcome)) => {
                        yield Ok(TurnEvent::Finished { session, outcome });
                    }
                    Err(e) => {
                        yield Err(e);
                    }
                }
            }
        };

        Ok((session_id, Box::pin(stream)))
    }

    /// Record the user message and build the provider request.
    /// An unknown or absent id starts a fresh session.
    async fn begin_turn(
        &self,
        session_id: Option<&str>,
        message: &str,
    ) -> AssessmentResult<PreparedTurn> {
        if message.trim().is_empty() {
            return Err(AssessmentError::invalid("Message is required"));
        }

        let existing = match session_id.filter(|id| !id.is_empty()) {
            Some(id) => self.store.get(id).await,
            None => None,
        };
        let session = match existing {
            Some(session) => session,
            None => {
                let session = self.store.create().await;
                info!("Chat opened new session {}", session.id);
                session
            }
        };

        let guard = self.locks.get_lock(&session.id).await.lock_owned().await;

        // Deleted while we waited for the lock
        let Some(mut session) = self
            .store
            .append_message(&session.id, Message::user(message))
            .await
        else {
            drop(guard);
            self.locks.remove(&session.id).await;
            return Err(AssessmentError::session_not_found());
        };

        if session.status == SessionStatus::CollectingInfo {
            session = self
                .store
                .update(
                    &session.id,
                    SessionPatch {
                        status: Some(SessionStatus::InProgress),
                        ..Default::default()
                    },
                )
                .await
                .ok_or_else(AssessmentError::session_not_found)?;
        }

        let request = CompletionRequest {
            messages: prompt(&session),
            temperature: self.settings.conversation_temperature,
            max_tokens: None,
            purpose: RequestPurpose::Conversation,
            progress: session.current_question,
        };

        Ok(PreparedTurn {
            session_id: session.id,
            request,
            guard,
        })
    }

    /// Store the assistant reply and advance progress by one question.
    /// A reply carrying the report heading completes the session.
    async fn finish_turn(
        &self,
        session_id: &str,
        reply: String,
    ) -> AssessmentResult<(Session, TurnOutcome)> {
        let outcome = if is_completion(&reply) {
            TurnOutcome::ReportReady
        } else {
            TurnOutcome::Continue
        };

        let session = self
            .store
            .append_message(session_id, Message::assistant(reply.clone()))
            .await
            .ok_or_else(AssessmentError::session_not_found)?;

        let mut patch = SessionPatch {
            current_question: Some(session.current_question + 1),
            ..Default::default()
        };

        if outcome == TurnOutcome::ReportReady {
            // Scores always describe the report that ends up stored
            let report = session.report_markdown.clone().unwrap_or(reply);
            patch.scores = Some(self.parser.extract_scores(&report));
            patch.status = Some(SessionStatus::Completed);
            patch.completed_at = Some(Utc::now());
            patch.report_markdown = Some(report);
        }

        let session = self
            .store
            .update(session_id, patch)
            .await
            .ok_or_else(AssessmentError::session_not_found)?;

        match outcome {
            TurnOutcome::ReportReady => info!("Assessment {} completed in chat", session_id),
            TurnOutcome::Continue => info!(
                "Turn completed on session {} (question {})",
                session_id, session.current_question
            ),
        }

        Ok((session, outcome))
    }

    // ========================================================================
    // Reports
    // ========================================================================

    /// Produce the report for a session with enough history.
    /// A session that already has one gets it back without a provider call.
    pub async fn generate_report(&self, session_id: &str) -> AssessmentResult<GeneratedReport> {
        // Unknown ids never get a lock entry
        self.get(session_id).await?;

        let lock = self.locks.get_lock(session_id).await;
        let _guard = lock.lock().await;

        let session = match self.store.get(session_id).await {
            Some(session) => session,
            None => {
                self.locks.remove(session_id).await;
                return Err(AssessmentError::session_not_found());
            }
        };

        if session.messages.len() < MIN_MESSAGES_FOR_REPORT {
            return Err(AssessmentError::Precondition(
                "Assessment not complete. Please answer all questions.".to_string(),
            ));
        }

        if let Some(report) = session.report_markdown.clone() {
            warn!("Report for {} already exists, returning stored copy", session_id);
            let scores = self.parser.extract_scores(&report);
            return Ok(GeneratedReport {
                session,
                report,
                scores,
            });
        }

        let mut messages = prompt(&session);
        messages.push(ChatMessage::from(&Message::user(REPORT_INSTRUCTION)));

        let request = CompletionRequest {
            messages,
            temperature: self.settings.report_temperature,
            max_tokens: Some(self.settings.report_max_tokens),
            purpose: RequestPurpose::Report,
            progress: session.current_question,
        };

        let report = self.provider.complete(request).await.map_err(|e| {
            error!("Report generation failed for {}: {:#}", session_id, e);
            AssessmentError::Provider(e)
        })?;

        let scores = self.parser.extract_scores(&report);
        let session = self
            .store
            .update(
                session_id,
                SessionPatch {
                    status: Some(SessionStatus::Completed),
                    completed_at: Some(Utc::now()),
                    report_markdown: Some(report.clone()),
                    scores: Some(scores.clone()),
                    ..Default::default()
                },
            )
            .await
            .ok_or_else(AssessmentError::session_not_found)?;

        info!(
            "Report generated for {} (overall {:.1})",
            session_id, scores.overall
        );
        Ok(GeneratedReport {
            session,
            report,
            scores,
        })
    }

    /// The stored report filtered for the session's tier
    pub async fn report_view(&self, session_id: &str) -> AssessmentResult<ReportView> {
        let session = self.get(session_id).await?;
        let Some(stored) = session.report_markdown.as_deref() else {
            return Err(AssessmentError::Precondition("Report not yet generated".to_string()));
        };

        let tier = session.report_tier;
        let report = self.tiers.render(stored, tier);
        let full_report = (tier == ReportTier::Pro).then(|| stored.to_string());

        Ok(ReportView {
            report,
            full_report,
            tier,
            can_upgrade: tier == ReportTier::Free,
            session,
        })
    }
}

/// System preamble followed by the stored history
fn prompt(session: &Session) -> Vec<ChatMessage> {
    std::iter::once(ChatMessage::from(&Message::system(SYSTEM_PROMPT)))
        .chain(session.messages.iter().map(ChatMessage::from))
        .collect()
}
