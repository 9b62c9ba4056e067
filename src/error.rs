//! Error types for pdf-translate-api
//!
//! This module provides:
//! - Domain-specific error types for the task lifecycle
//! - HTTP status code mapping for API integration
//! - Structured error responses with machine-readable error codes

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use utoipa::ToSchema;

use crate::types::TaskStatus;

/// Result type alias for pdf-translate-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for pdf-translate-api
///
/// Only boundary operations return these to clients. Background work (job
/// execution, expiry) records failures on the task or logs them instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "retention")
        key: Option<String>,
    },

    /// Upload rejected before a task was created
    #[error("{0}")]
    Validation(String),

    /// The upload or its output directory could not be written
    #[error("failed to save file: {reason}")]
    Storage {
        /// Path that could not be written
        path: PathBuf,
        /// Underlying cause
        reason: String,
    },

    /// Request body exceeded the configured upload limit
    #[error("upload exceeds the limit of {limit} bytes")]
    PayloadTooLarge {
        /// Configured limit in bytes
        limit: usize,
    },

    /// Task lookup or state error
    #[error(transparent)]
    Task(#[from] TaskError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Task-related errors
#[derive(Debug, Error)]
pub enum TaskError {
    /// No task with this id exists (never submitted, deleted, or expired)
    #[error("task not found")]
    NotFound {
        /// The id that was looked up, as given by the client
        id: String,
    },

    /// Download attempted before the translation finished
    #[error("translation not completed")]
    NotCompleted {
        /// The task id
        id: String,
        /// The status the task was in
        status: TaskStatus,
    },

    /// The task completed but its artifact is gone from disk
    #[error("translation file not found")]
    ArtifactMissing {
        /// The task id
        id: String,
        /// Where the artifact was expected
        path: Option<PathBuf>,
    },

    /// A status change that would move the task backwards
    #[error("task {id} cannot move from {from} to {to}")]
    InvalidTransition {
        /// The task id
        id: String,
        /// Current status
        from: TaskStatus,
        /// Requested status
        to: TaskStatus,
    },
}

/// API error response format
///
/// # Example JSON Response
///
/// ```json
/// {
///   "error": {
///     "code": "task_not_found",
///     "message": "task not found",
///     "details": {
///       "task_id": "6f1c..."
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// The error details
    pub error: ErrorDetail,
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "task_not_found", "validation_error")
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional context about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    /// Create a "validation error" error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new("validation_error", message)
    }
}

/// Convert errors to HTTP status codes for API responses
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Error::Validation(_) => 400,
            Error::Task(TaskError::NotCompleted { .. }) => 400,

            // 404 Not Found
            Error::Task(TaskError::NotFound { .. }) => 404,
            Error::Task(TaskError::ArtifactMissing { .. }) => 404,

            // 413 Payload Too Large
            Error::PayloadTooLarge { .. } => 413,

            // 409 Conflict
            Error::Task(TaskError::InvalidTransition { .. }) => 409,

            // 500 Internal Server Error
            Error::Config { .. } => 500,
            Error::Storage { .. } => 500,
            Error::Io(_) => 500,
            Error::ApiServerError(_) => 500,
            Error::Other(_) => 500,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::Validation(_) => "validation_error",
            Error::Storage { .. } => "storage_error",
            Error::PayloadTooLarge { .. } => "payload_too_large",
            Error::Task(e) => match e {
                TaskError::NotFound { .. } => "task_not_found",
                TaskError::NotCompleted { .. } => "not_completed",
                TaskError::ArtifactMissing { .. } => "file_not_found",
                TaskError::InvalidTransition { .. } => "invalid_transition",
            },
            Error::Io(_) => "io_error",
            Error::ApiServerError(_) => "api_server_error",
            Error::Other(_) => "internal_error",
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let code = error.error_code().to_string();
        let message = error.to_string();

        let details = match &error {
            Error::Task(TaskError::NotFound { id }) => Some(serde_json::json!({
                "task_id": id,
            })),
            Error::Task(TaskError::NotCompleted { id, status }) => Some(serde_json::json!({
                "task_id": id,
                "status": status,
            })),
            Error::Task(TaskError::ArtifactMissing { id, .. }) => Some(serde_json::json!({
                "task_id": id,
            })),
            Error::Task(TaskError::InvalidTransition { id, from, to }) => {
                Some(serde_json::json!({
                    "task_id": id,
                    "from": from,
                    "to": to,
                }))
            }
            Error::PayloadTooLarge { limit } => Some(serde_json::json!({
                "limit_bytes": limit,
            })),
            _ => None,
        };

        ApiError {
            error: ErrorDetail {
                code,
                message,
                details,
            },
        }
    }
}
