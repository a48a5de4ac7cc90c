// src/api/http/chat.rs
// Chat endpoints: SSE streaming turn and the single-response variant

use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    Json,
};
use futures::StreamExt;
use std::convert::Infallible;
use tracing::{error, info};

use crate::api::error::{ApiError, ApiResult, IntoApiError, IntoApiErrorOption};
use crate::api::types::{ChatRequest, ChatSyncResponse, StreamFrame};
use crate::assessment::{AssessmentError, TurnEvent, TurnOutcome};
use crate::state::AppState;

pub const SESSION_ID_HEADER: &str = "x-session-id";

const CHAT_FAILED: &str = "Failed to process chat";

fn frame_event(frame: &StreamFrame) -> Result<Event, Infallible> {
    let data = serde_json::to_string(frame).unwrap_or_default();
    Ok(Event::default().data(data))
}

/// POST /chat
///
/// Streams `data: {content, sessionId}` frames, then one `{done: true}` frame.
/// A provider failure after the stream has started ends it with an `{error}` frame.
pub async fn chat_stream_handler(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> ApiResult<Response> {
    let message = req.message.ok_or_bad_request("Message is required")?;

    let (session_id, mut turns) = state
        .assessments
        .chat_stream(req.session_id.as_deref(), &message)
        .await
        .into_api_error(CHAT_FAILED)?;

    info!("Streaming chat turn for session {}", session_id);

    let id = session_id.clone();
    let stream = async_stream::stream! {
        while let Some(event) = turns.next().await {
            match event {
                Ok(TurnEvent::Delta(text)) => {
                    yield frame_event(&StreamFrame::content(&id, text));
                }
                Ok(TurnEvent::Finished { outcome, .. }) => {
                    let report_ready = outcome == TurnOutcome::ReportReady;
                    yield frame_event(&StreamFrame::done(&id, report_ready));
                }
                Err(e) => {
                    let message = match e {
                        AssessmentError::Provider(_) => CHAT_FAILED.to_string(),
                        other => other.to_string(),
                    };
                    error!("Chat stream for {} ended with error: {}", id, message);
                    yield frame_event(&StreamFrame::error(&id, message));
                    break;
                }
            }
        }
    };

    let header_value = HeaderValue::from_str(&session_id)
        .map_err(|_| ApiError::internal(CHAT_FAILED))?;

    let mut response = Sse::new(stream)
        .keep_alive(KeepAlive::default())
        .into_response();
    let headers = response.headers_mut();
    headers.insert(HeaderName::from_static(SESSION_ID_HEADER), header_value);
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));

    Ok(response)
}

/// POST /chat/sync
pub async fn chat_sync_handler(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> ApiResult<Json<ChatSyncResponse>> {
    let message = req.message.ok_or_bad_request("Message is required")?;

    let turn = state
        .assessments
        .chat_sync(req.session_id.as_deref(), &message)
        .await
        .into_api_error(CHAT_FAILED)?;

    Ok(Json(ChatSyncResponse {
        session_id: turn.session.id,
        message: turn.reply,
        status: turn.session.status,
        current_question: turn.session.current_question,
    }))
}
