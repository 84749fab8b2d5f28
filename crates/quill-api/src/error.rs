use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use quill_db::DbError;
use quill_types::api::ErrorResponse;
use thiserror::Error;
use tracing::error;

use crate::validation::ValidationError;

/// Failures raised by the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Username '{0}' already exists")]
    DuplicateUsername(String),

    #[error("Post with ID {0} not found")]
    PostNotFound(String),

    #[error("Author with ID {0} not found")]
    UnknownAuthor(String),

    #[error("Post {post_id} or author {author_id} does not exist")]
    UnknownReference { post_id: String, author_id: String },

    #[error(transparent)]
    Database(#[from] DbError),
}

/// Errors as seen by HTTP callers. The message of every variant except
/// `Internal` is returned verbatim in the `detail` field.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    /// Duplicate username. Reported as 400 rather than 409.
    #[error("{0}")]
    Conflict(String),

    /// A referenced entity (post, author) is missing.
    #[error("{0}")]
    BadReference(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Authentication(String),

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Conflict(_) | ApiError::BadReference(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let message = err.to_string();
        match err {
            ServiceError::Validation(_) => ApiError::Validation(message),
            ServiceError::DuplicateUsername(_) => ApiError::Conflict(message),
            ServiceError::PostNotFound(_)
            | ServiceError::UnknownAuthor(_)
            | ServiceError::UnknownReference { .. } => ApiError::BadReference(message),
            ServiceError::Database(db_err) => {
                error!("Database error: {}", db_err);
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            detail: self.to_string(),
        });
        (status, body).into_response()
    }
}
