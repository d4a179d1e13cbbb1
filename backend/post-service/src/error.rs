/// Error types for Post Service
///
/// Every error leaves the service as `{"detail": "..."}` with the status
/// code chosen by [`ResponseError::status_code`].
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Result type for post-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Payload or parameter violates a field constraint
    #[error("{0}")]
    Validation(String),

    /// Referenced resource does not exist
    #[error("{0}")]
    NotFound(String),

    /// Caller-supplied value failed a sanity check
    #[error("{0}")]
    BadRequest(String),

    /// Unexpected failure with a caller-visible message
    #[error("{0}")]
    Internal(String),

    /// Storage failure; the cause is logged, not returned
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Error body shared by every failing route
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}

impl AppError {
    pub fn post_not_found(post_id: i64) -> Self {
        AppError::NotFound(format!("Post with id {} not found", post_id))
    }

    /// Message returned to the caller
    pub fn detail(&self) -> String {
        match self {
            AppError::Database(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Database(err) = self {
            tracing::error!(error = %err, "database operation failed");
        }

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            detail: self.detail(),
        })
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}
