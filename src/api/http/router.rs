// src/api/http/router.rs
// HTTP router composition: /api routes, root health, CORS and request tracing

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use super::{
    assessment::{
        delete_assessment, get_assessment, list_assessments, start_assessment,
        update_client_info, upgrade_assessment,
    },
    chat::{chat_stream_handler, chat_sync_handler, SESSION_ID_HEADER},
    handlers::health_handler,
    report::{generate_report, get_report},
};
use crate::state::AppState;

/// Routes nested under /api
pub fn api_router() -> Router<AppState> {
    Router::new()
        // Health
        .route("/health", get(health_handler))

        // Assessment lifecycle
        .route("/assessment", get(list_assessments))
        .route("/assessment/start", post(start_assessment))
        .route(
            "/assessment/{session_id}",
            get(get_assessment).delete(delete_assessment),
        )
        .route("/assessment/{session_id}/client-info", patch(update_client_info))
        .route("/assessment/{session_id}/upgrade", post(upgrade_assessment))

        // Chat
        .route("/chat", post(chat_stream_handler))
        .route("/chat/sync", post(chat_sync_handler))

        // Reports
        .route("/report/generate", post(generate_report))
        .route("/report/{session_id}", get(get_report))
}

/// Allow-listed origins with credentials; `X-Session-Id` is readable by browsers
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([HeaderName::from_static(SESSION_ID_HEADER)])
}

/// Create the router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins());

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
