// src/assessment/error.rs
// Failure taxonomy of the assessment service

/// Fields a client profile must carry, by their wire names
pub const REQUIRED_CLIENT_FIELDS: [&str; 4] =
    ["companyName", "contactName", "contactEmail", "contactRole"];

#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    /// Rejected input. `required` lists the mandatory fields when some were missing.
    #[error("{message}")]
    Validation {
        message: String,
        required: Option<Vec<&'static str>>,
    },

    #[error("{0}")]
    NotFound(String),

    /// Valid input that the session's current state does not allow
    #[error("{0}")]
    Precondition(String),

    #[error("Provider error: {0}")]
    Provider(#[from] anyhow::Error),
}

impl AssessmentError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            required: None,
        }
    }

    pub fn missing_client_fields() -> Self {
        Self::Validation {
            message: "Missing required fields".to_string(),
            required: Some(REQUIRED_CLIENT_FIELDS.to_vec()),
        }
    }

    pub fn session_not_found() -> Self {
        Self::NotFound("Session not found".to_string())
    }
}

pub type AssessmentResult<T> = Result<T, AssessmentError>;
