//! Route handlers for the REST API
//!
//! Handlers are organized by domain:
//! - [`tasks`] — Upload, status, download, listing and deletion of translation tasks
//! - [`system`] — Banner, health, OpenAPI

use crate::error::{Error, TaskError};
use crate::types::TaskId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod system;
mod tasks;

// Re-export all handlers so `routes::function_name` continues to work
pub use system::*;
pub use tasks::*;

// ============================================================================
// Request/Response Types (shared across handlers)
// ============================================================================

/// Multipart form accepted by POST /translate (documentation only)
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct TranslateForm {
    /// The PDF to translate; its file name must end in `.pdf`
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    /// Target language code (default: "ko")
    pub lang_out: Option<String>,
    /// Skip the bilingual side-by-side output (default: false)
    pub no_dual: Option<bool>,
}

/// Plain acknowledgement body
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    /// Human-readable outcome
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response for GET /health
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    /// Always "healthy" while the process serves requests
    pub status: String,
    /// Server time of the check
    pub timestamp: DateTime<Utc>,
}

/// Response for GET /
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ServiceInfo {
    /// Service name
    pub message: String,
    /// Crate version
    pub version: String,
}

/// Parse a task id from a path segment
///
/// Anything that is not a UUID cannot name a task, so it is reported the
/// same way as an unknown id.
pub(crate) fn parse_task_id(raw: &str) -> Result<TaskId, Error> {
    raw.trim().parse().map_err(|_| {
        Error::Task(TaskError::NotFound {
            id: raw.to_string(),
        })
    })
}
