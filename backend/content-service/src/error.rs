/// Error types for the social content service
///
/// Every failure the core can report is local and recoverable: callers surface
/// a message to the user and carry on. Errors are converted to JSON HTTP
/// responses for API clients.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

/// Result type for content operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Input rejected before anything was written
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Missing, deleted or already expired resource
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn story_not_found(id: i64) -> Self {
        AppError::NotFound(format!("story {} not found", id))
    }

    pub fn post_not_found(id: i64) -> Self {
        AppError::NotFound(format!("post {} not found", id))
    }

    pub fn comment_not_found(id: i64) -> Self {
        AppError::NotFound(format!("comment {} not found", id))
    }

    pub fn user_not_found(key: impl std::fmt::Display) -> Self {
        AppError::NotFound(format!("user {} not found", key))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        HttpResponse::build(status).json(serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }))
    }
}
