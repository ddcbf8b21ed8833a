//! Error handling for the server API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use study_core::StudyError;
use thiserror::Error;

use crate::services::storage::StorageError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Study(#[from] StudyError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Study(err) => match err {
                StudyError::InvalidRating(_) => (StatusCode::BAD_REQUEST, "invalid_rating"),
                StudyError::NotEnoughCards { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "not_enough_cards")
                }
                StudyError::Validation { .. }
                | StudyError::UnknownLesson(_)
                | StudyError::Json(_) => (StatusCode::BAD_REQUEST, "validation_error"),
                StudyError::NoDueCards => (StatusCode::CONFLICT, "no_due_cards"),
                StudyError::AlreadyAnswered => (StatusCode::CONFLICT, "already_answered"),
                StudyError::UnknownTile(_) => (StatusCode::BAD_REQUEST, "unknown_tile"),
            },
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            ApiError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_kind();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
