// src/api/types.rs
// Request and response bodies of the HTTP API (camelCase on the wire)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::{ClientInfo, ReportTier, Scores, Session, SessionStatus};

// ── Assessment

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartAssessmentResponse {
    pub session_id: String,
    pub message: String,
    pub client_info: ClientInfo,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentStatusResponse {
    pub session_id: String,
    pub status: SessionStatus,
    pub current_question: usize,
    pub client_info: Option<ClientInfo>,
    pub message_count: usize,
    pub report_tier: ReportTier,
    pub has_report: bool,
    pub scores: Option<Scores>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&Session> for AssessmentStatusResponse {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.id.clone(),
            status: session.status,
            current_question: session.current_question,
            client_info: session.client_info.clone(),
            message_count: session.messages.len(),
            report_tier: session.report_tier,
            has_report: session.has_report(),
            scores: session.scores.clone(),
            created_at: session.created_at,
            updated_at: session.updated_at,
            completed_at: session.completed_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfoResponse {
    pub session_id: String,
    pub client_info: Option<ClientInfo>,
}

const UNKNOWN: &str = "Unknown";

/// One row of the admin listing
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSummary {
    pub session_id: String,
    pub company_name: String,
    pub contact_name: String,
    pub contact_email: String,
    pub status: SessionStatus,
    pub report_tier: ReportTier,
    pub scores: Option<Scores>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&Session> for AssessmentSummary {
    fn from(session: &Session) -> Self {
        let info = session.client_info.as_ref();
        Self {
            session_id: session.id.clone(),
            company_name: info.map_or(UNKNOWN, |c| c.company_name.as_str()).to_string(),
            contact_name: info.map_or(UNKNOWN, |c| c.contact_name.as_str()).to_string(),
            contact_email: info.map_or(UNKNOWN, |c| c.contact_email.as_str()).to_string(),
            status: session.status,
            report_tier: session.report_tier,
            scores: session.scores.clone(),
            created_at: session.created_at,
            completed_at: session.completed_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssessmentListResponse {
    pub count: usize,
    pub assessments: Vec<AssessmentSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeResponse {
    pub session_id: String,
    pub message: String,
    pub report_tier: ReportTier,
}

// ── Chat

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSyncResponse {
    pub session_id: String,
    pub message: String,
    pub status: SessionStatus,
    pub current_question: usize,
}

/// One `data:` frame of the chat stream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamFrame {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_ready: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub session_id: String,
}

impl StreamFrame {
    pub fn content(session_id: &str, content: String) -> Self {
        Self {
            content: Some(content),
            session_id: session_id.to_string(),
            ..Default::default()
        }
    }

    /// Closing frame; `reportReady` only appears when the turn produced the report
    pub fn done(session_id: &str, report_ready: bool) -> Self {
        Self {
            done: Some(true),
            report_ready: report_ready.then_some(true),
            session_id: session_id.to_string(),
            ..Default::default()
        }
    }

    pub fn error(session_id: &str, message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            session_id: session_id.to_string(),
            ..Default::default()
        }
    }
}

// ── Report

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportRequest {
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportResponse {
    pub session_id: String,
    pub report: String,
    pub scores: Scores,
    pub status: SessionStatus,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub session_id: String,
    pub report: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_report: Option<String>,
    pub scores: Option<Scores>,
    pub tier: ReportTier,
    pub can_upgrade: bool,
    pub client_info: Option<ClientInfo>,
    pub completed_at: Option<DateTime<Utc>>,
}

// ── Health

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}
