// src/api/http/assessment.rs
// Assessment lifecycle endpoints: start, status, profile, listing, deletion, upgrade

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::api::error::{ApiError, ApiResult, IntoApiError};
use crate::api::types::{
    AssessmentListResponse, AssessmentStatusResponse, AssessmentSummary, ClientInfoResponse,
    MessageResponse, StartAssessmentResponse, UpgradeResponse,
};
use crate::assessment::ClientInfoInput;
use crate::state::AppState;

/// POST /assessment/start
pub async fn start_assessment(
    State(state): State<AppState>,
    Json(input): Json<ClientInfoInput>,
) -> ApiResult<Json<StartAssessmentResponse>> {
    let session = state
        .assessments
        .start(input)
        .await
        .into_api_error("Failed to start assessment")?;

    let client_info = session
        .client_info
        .ok_or_else(|| ApiError::internal("Failed to start assessment"))?;

    Ok(Json(StartAssessmentResponse {
        session_id: session.id,
        message: "Assessment started successfully".to_string(),
        client_info,
    }))
}

/// GET /assessment/{session_id}
pub async fn get_assessment(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<AssessmentStatusResponse>> {
    let session = state
        .assessments
        .get(&session_id)
        .await
        .into_api_error("Failed to get assessment")?;

    Ok(Json(AssessmentStatusResponse::from(&session)))
}

/// PATCH /assessment/{session_id}/client-info
pub async fn update_client_info(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(input): Json<ClientInfoInput>,
) -> ApiResult<Json<ClientInfoResponse>> {
    let session = state
        .assessments
        .update_client_info(&session_id, input)
        .await
        .into_api_error("Failed to update client info")?;

    Ok(Json(ClientInfoResponse {
        session_id: session.id,
        client_info: session.client_info,
    }))
}

/// GET /assessment
pub async fn list_assessments(State(state): State<AppState>) -> Json<AssessmentListResponse> {
    let assessments: Vec<AssessmentSummary> = state
        .assessments
        .list()
        .await
        .iter()
        .map(AssessmentSummary::from)
        .collect();

    Json(AssessmentListResponse {
        count: assessments.len(),
        assessments,
    })
}

/// DELETE /assessment/{session_id}
pub async fn delete_assessment(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .assessments
        .delete(&session_id)
        .await
        .into_api_error("Failed to delete assessment")?;

    Ok(Json(MessageResponse {
        message: "Assessment deleted successfully".to_string(),
    }))
}

/// POST /assessment/{session_id}/upgrade
pub async fn upgrade_assessment(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<UpgradeResponse>> {
    let session = state
        .assessments
        .upgrade(&session_id)
        .await
        .into_api_error("Failed to upgrade")?;

    info!("Upgrade accepted for {}", session.id);
    Ok(Json(UpgradeResponse {
        session_id: session.id,
        message: "Upgraded to Pro successfully".to_string(),
        report_tier: session.report_tier,
    }))
}
