// src/api/http/report.rs
// Report endpoints: explicit generation and the tier-filtered view

use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::error::{ApiResult, IntoApiError, IntoApiErrorOption};
use crate::api::types::{GenerateReportRequest, GenerateReportResponse, ReportResponse};
use crate::state::AppState;

/// POST /report/generate
pub async fn generate_report(
    State(state): State<AppState>,
    Json(req): Json<GenerateReportRequest>,
) -> ApiResult<Json<GenerateReportResponse>> {
    let session_id = req
        .session_id
        .filter(|id| !id.is_empty())
        .ok_or_bad_request("Session ID is required")?;

    let generated = state
        .assessments
        .generate_report(&session_id)
        .await
        .into_api_error("Failed to generate report")?;

    Ok(Json(GenerateReportResponse {
        session_id: generated.session.id,
        report: generated.report,
        scores: generated.scores,
        status: generated.session.status,
    }))
}

/// GET /report/{session_id}
pub async fn get_report(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<ReportResponse>> {
    let view = state
        .assessments
        .report_view(&session_id)
        .await
        .into_api_error("Failed to get report")?;

    Ok(Json(ReportResponse {
        session_id: view.session.id,
        report: view.report,
        full_report: view.full_report,
        scores: view.session.scores,
        tier: view.tier,
        can_upgrade: view.can_upgrade,
        client_info: view.session.client_info,
        completed_at: view.session.completed_at,
    }))
}
