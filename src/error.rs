//! Error types for the task service and its HTTP mapping.

use crate::types::TaskId;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Failures raised by the task service.
#[derive(Debug, Error)]
pub enum TaskError {
    /// No stored task has the requested id.
    #[error("Task not found with id: {0}")]
    NotFound(TaskId),

    /// The backing store failed.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Result type for service operations.
pub type TaskResult<T> = std::result::Result<T, TaskError>;

/// Error codes carried in JSON error bodies.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    DatabaseError,
}

/// JSON body for server-side failures.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

/// HTTP-facing wrapper around [`TaskError`].
#[derive(Debug)]
pub struct ApiError(pub TaskError);

impl From<TaskError> for ApiError {
    fn from(err: TaskError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            // Not-found responses carry no body.
            TaskError::NotFound(_) => StatusCode::NOT_FOUND.into_response(),
            TaskError::Storage(err) => {
                tracing::error!(error = %err, "Task storage failure");
                let body = ErrorBody {
                    code: ErrorCode::DatabaseError,
                    message: err.to_string(),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
