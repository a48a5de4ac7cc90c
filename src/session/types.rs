// src/session/types.rs
// Session records and the values they own

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of questions in the assessment script
pub const QUESTION_COUNT: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// Contact details captured before the questionnaire starts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub company_name: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_size: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    CollectingInfo,
    InProgress,
    Completed,
    /// Side exit; nothing in the service sets it today
    Abandoned,
}

impl SessionStatus {
    fn rank(self) -> u8 {
        match self {
            SessionStatus::CollectingInfo => 0,
            SessionStatus::InProgress => 1,
            SessionStatus::Completed => 2,
            SessionStatus::Abandoned => 3,
        }
    }

    /// Whether moving from `self` to `next` respects the forward-only lifecycle
    pub fn can_advance_to(self, next: SessionStatus) -> bool {
        match (self, next) {
            (SessionStatus::Abandoned, _) => next == SessionStatus::Abandoned,
            (_, SessionStatus::Abandoned) => self != SessionStatus::Completed,
            _ => next.rank() >= self.rank(),
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::CollectingInfo => write!(f, "collecting_info"),
            SessionStatus::InProgress => write!(f, "in_progress"),
            SessionStatus::Completed => write!(f, "completed"),
            SessionStatus::Abandoned => write!(f, "abandoned"),
        }
    }
}

/// Report visibility. `Pro` is the paid tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportTier {
    #[default]
    Free,
    #[serde(alias = "paid")]
    Pro,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scores {
    pub pain_points: f64,
    pub data_readiness: f64,
    pub org_readiness: f64,
    pub process_maturity: f64,
    pub strategic_priorities: f64,
    pub strategic_intent: String,
    pub overall: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub client_info: Option<ClientInfo>,
    pub messages: Vec<Message>,
    pub current_question: usize,
    pub status: SessionStatus,
    pub report_tier: ReportTier,
    pub report_markdown: Option<String>,
    pub scores: Option<Scores>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            client_info: None,
            messages: Vec::new(),
            current_question: 0,
            status: SessionStatus::CollectingInfo,
            report_tier: ReportTier::Free,
            report_markdown: None,
            scores: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    pub fn has_report(&self) -> bool {
        self.report_markdown.is_some()
    }

    /// Apply a patch while keeping the session invariants:
    /// progress never moves backwards or past the last question,
    /// status only moves forward, and a stored report is never replaced.
    pub fn apply(&mut self, patch: SessionPatch) {
        if let Some(info) = patch.client_info {
            self.client_info = Some(info);
        }
        if let Some(question) = patch.current_question {
            self.current_question = question.clamp(self.current_question, QUESTION_COUNT);
        }
        if let Some(status) = patch.status {
            if self.status.can_advance_to(status) {
                self.status = status;
            }
        }
        if let Some(tier) = patch.report_tier {
            self.report_tier = tier;
        }
        if let Some(report) = patch.report_markdown {
            if self.report_markdown.is_none() {
                self.report_markdown = Some(report);
            }
        }
        if let Some(scores) = patch.scores {
            self.scores = Some(scores);
        }
        if let Some(completed_at) = patch.completed_at {
            self.completed_at.get_or_insert(completed_at);
        }
        self.updated_at = Utc::now();
    }
}

/// Partial update merged into a stored session
#[derive(Debug, Clone, Default)]
pub struct SessionPatch {
    pub client_info: Option<ClientInfo>,
    pub current_question: Option<usize>,
    pub status: Option<SessionStatus>,
    pub report_tier: Option<ReportTier>,
    pub report_markdown: Option<String>,
    pub scores: Option<Scores>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_only_moves_forward() {
        let mut session = Session::new("s1");
        session.apply(SessionPatch { status: Some(SessionStatus::InProgress), ..Default::default() });
        assert_eq!(session.status, SessionStatus::InProgress);

        session.apply(SessionPatch { status: Some(SessionStatus::Completed), ..Default::default() });
        session.apply(SessionPatch { status: Some(SessionStatus::InProgress), ..Default::default() });
        assert_eq!(session.status, SessionStatus::Completed);

        session.apply(SessionPatch { status: Some(SessionStatus::Abandoned), ..Default::default() });
        assert_eq!(session.status, SessionStatus::Completed);
    }

    #[test]
    fn test_progress_is_monotonic_and_capped() {
        let mut session = Session::new("s1");
        session.apply(SessionPatch { current_question: Some(5), ..Default::default() });
        session.apply(SessionPatch { current_question: Some(2), ..Default::default() });
        assert_eq!(session.current_question, 5);

        session.apply(SessionPatch { current_question: Some(99), ..Default::default() });
        assert_eq!(session.current_question, QUESTION_COUNT);
    }

    #[test]
    fn test_report_is_written_once() {
        let mut session = Session::new("s1");
        session.apply(SessionPatch { report_markdown: Some("first".into()), ..Default::default() });
        session.apply(SessionPatch { report_markdown: Some("second".into()), ..Default::default() });
        assert_eq!(session.report_markdown.as_deref(), Some("first"));
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&SessionStatus::InProgress).unwrap(), "\"in_progress\"");
        assert_eq!(serde_json::to_string(&ReportTier::Pro).unwrap(), "\"pro\"");
        assert_eq!(serde_json::from_str::<ReportTier>("\"paid\"").unwrap(), ReportTier::Pro);
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
    }
}
