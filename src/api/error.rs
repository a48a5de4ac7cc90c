// src/api/error.rs
// HTTP error responses and the mapping from service failures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;
use tracing::error;

use crate::assessment::AssessmentError;

/// Standard API error response format
#[derive(Debug)]
pub struct ApiError {
    pub message: String,
    pub status_code: StatusCode,
    pub error_code: Option<String>,
    /// Mandatory fields, reported when some were missing
    pub required: Option<Vec<&'static str>>,
}

impl ApiError {
    fn new(status_code: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code,
            error_code: Some(code.to_string()),
            required: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn with_required(mut self, required: Option<Vec<&'static str>>) -> Self {
        self.required = required;
        self
    }

    /// Map a service failure. Provider failures are logged and reported
    /// with the generic `operation` message only.
    pub fn from_assessment(err: AssessmentError, operation: &str) -> Self {
        match err {
            AssessmentError::Validation { message, required } => {
                Self::bad_request(message).with_required(required)
            }
            AssessmentError::NotFound(message) => Self::not_found(message),
            AssessmentError::Precondition(message) => Self::bad_request(message),
            AssessmentError::Provider(e) => {
                error!("{}: {:#}", operation, e);
                Self::internal(operation)
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<AssessmentError> for ApiError {
    fn from(err: AssessmentError) -> Self {
        Self::from_assessment(err, "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response_json = json!({
            "error": true,
            "message": self.message,
            "status": self.status_code.as_u16()
        });

        if let Some(error_code) = self.error_code {
            response_json["error_code"] = json!(error_code);
        }
        if let Some(required) = self.required {
            response_json["required"] = json!(required);
        }

        (self.status_code, Json(response_json)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Attach the per-operation 500 message to a service result
pub trait IntoApiError<T> {
    fn into_api_error(self, operation: &str) -> ApiResult<T>;
}

impl<T> IntoApiError<T> for Result<T, AssessmentError> {
    fn into_api_error(self, operation: &str) -> ApiResult<T> {
        self.map_err(|e| ApiError::from_assessment(e, operation))
    }
}

/// Extension trait for Option<T> to create ApiError for None cases
pub trait IntoApiErrorOption<T> {
    fn ok_or_bad_request(self, message: &str) -> ApiResult<T>;
}

impl<T> IntoApiErrorOption<T> for Option<T> {
    fn ok_or_bad_request(self, message: &str) -> ApiResult<T> {
        self.ok_or_else(|| ApiError::bad_request(message))
    }
}
