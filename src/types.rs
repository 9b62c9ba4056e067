//! Core types for pdf-translate-api

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::TaskError;

/// Unique identifier for a translation task
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
#[schema(value_type = String, format = Uuid)]
pub struct TaskId(pub Uuid);

impl TaskId {
    /// Generate a fresh random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the inner UUID
    pub fn get(&self) -> Uuid {
        self.0
    }

    /// First eight hex digits, used to keep per-task paths distinct
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Task status
///
/// Moves only forward: `pending -> processing -> {completed, failed}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Accepted, waiting for the executor to pick it up
    Pending,
    /// The external translator is running
    Processing,
    /// Translation produced an artifact
    Completed,
    /// Translation failed or produced no artifact
    Failed,
}

impl TaskStatus {
    /// Whether the status is final
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }

    /// Whether moving from `self` to `next` respects the forward-only order
    pub fn can_transition_to(&self, next: TaskStatus) -> bool {
        matches!(
            (self, next),
            (TaskStatus::Pending, TaskStatus::Processing)
                | (TaskStatus::Pending, TaskStatus::Failed)
                | (TaskStatus::Processing, TaskStatus::Completed)
                | (TaskStatus::Processing, TaskStatus::Failed)
        )
    }

    /// Lowercase name as used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Processing => "processing",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One submitted translation job
///
/// Paths are owned exclusively by the task. `output_file` is private so the
/// only way to set it is [`TaskRecord::complete`], which also flips the
/// status; that keeps "output_file is set iff completed" true by construction.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct TaskRecord {
    /// Task identifier
    pub task_id: TaskId,
    /// Current status
    pub status: TaskStatus,
    /// Human-readable description of the current state
    pub message: String,
    /// Original upload file name (display only)
    pub file_name: String,
    /// Submission time
    pub created_at: DateTime<Utc>,
    /// Persisted upload
    #[schema(value_type = String)]
    pub input_file: PathBuf,
    /// Dedicated output directory
    #[schema(value_type = String)]
    pub output_dir: PathBuf,
    /// Produced artifact (only once completed)
    #[schema(value_type = Option<String>)]
    output_file: Option<PathBuf>,
    /// Download link (only once completed)
    download_url: Option<String>,
}

impl TaskRecord {
    /// Create a new `pending` record
    pub fn new(
        task_id: TaskId,
        file_name: impl Into<String>,
        input_file: PathBuf,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            task_id,
            status: TaskStatus::Pending,
            message: "translation pending".to_string(),
            file_name: file_name.into(),
            created_at: Utc::now(),
            input_file,
            output_dir,
            output_file: None,
            download_url: None,
        }
    }

    /// The produced artifact, if the task completed
    pub fn output_file(&self) -> Option<&PathBuf> {
        self.output_file.as_ref()
    }

    /// The download link, if the task completed
    pub fn download_url(&self) -> Option<&str> {
        self.download_url.as_deref()
    }

    fn transition(&mut self, next: TaskStatus, message: String) -> Result<(), TaskError> {
        if !self.status.can_transition_to(next) {
            return Err(TaskError::InvalidTransition {
                id: self.task_id.to_string(),
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.message = message;
        Ok(())
    }

    /// `pending -> processing`
    pub fn start(&mut self) -> Result<(), TaskError> {
        self.transition(TaskStatus::Processing, "translating...".to_string())
    }

    /// `processing -> completed`, recording the artifact
    pub fn complete(&mut self, output_file: PathBuf) -> Result<(), TaskError> {
        self.transition(
            TaskStatus::Completed,
            "translation completed".to_string(),
        )?;
        self.output_file = Some(output_file);
        self.download_url = Some(download_url_for(self.task_id));
        Ok(())
    }

    /// `pending | processing -> failed`
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), TaskError> {
        self.transition(TaskStatus::Failed, message.into())
    }

    /// Public view returned by the status endpoint
    pub fn info(&self) -> TaskInfo {
        TaskInfo {
            task_id: self.task_id,
            status: self.status,
            message: self.message.clone(),
            file_name: self.file_name.clone(),
            download_url: self.download_url.clone(),
        }
    }
}

/// Download path for a completed task
pub fn download_url_for(task_id: TaskId) -> String {
    format!("/download/{}", task_id)
}

/// Options given with an upload
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TranslateOptions {
    /// Target language code (e.g., "ko", "en")
    pub lang_out: String,
    /// Produce only the translated PDF, without the bilingual side-by-side copy
    #[serde(default)]
    pub no_dual: bool,
}

impl TranslateOptions {
    /// Options with the given target language and dual output enabled
    pub fn new(lang_out: impl Into<String>) -> Self {
        Self {
            lang_out: lang_out.into(),
            no_dual: false,
        }
    }
}

/// Response to a submission
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct TranslationResponse {
    /// New task id
    pub task_id: TaskId,
    /// Always `pending`
    pub status: TaskStatus,
    /// Acknowledgement message
    pub message: String,
    /// Always null at submission time
    pub download_url: Option<String>,
}

/// Public task fields returned by the status endpoint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TaskInfo {
    /// Task id
    pub task_id: TaskId,
    /// Current status
    pub status: TaskStatus,
    /// Current state description
    pub message: String,
    /// Original upload file name
    pub file_name: String,
    /// Set once the task is completed
    pub download_url: Option<String>,
}

/// Snapshot of every task in the registry
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct TaskList {
    /// Records keyed by task id
    pub tasks: BTreeMap<TaskId, TaskRecord>,
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> TaskRecord {
        TaskRecord::new(
            TaskId::new(),
            "report.pdf",
            PathBuf::from("uploads/a_report.pdf"),
            PathBuf::from("output/report_20240101_000000_abcd1234"),
        )
    }

    #[test]
    fn new_record_is_pending_without_output() {
        let r = record();
        assert_eq!(r.status, TaskStatus::Pending);
        assert_eq!(r.message, "translation pending");
        assert!(r.output_file().is_none());
        assert!(r.download_url().is_none());
    }

    #[test]
    fn happy_path_sets_output_and_link_together() {
        let mut r = record();
        r.start().unwrap();
        assert_eq!(r.status, TaskStatus::Processing);
        assert_eq!(r.message, "translating...");

        r.complete(PathBuf::from("out/report.ko.mono.pdf")).unwrap();
        assert_eq!(r.status, TaskStatus::Completed);
        assert_eq!(r.message, "translation completed");
        assert_eq!(
            r.output_file().unwrap(),
            &PathBuf::from("out/report.ko.mono.pdf")
        );
        assert_eq!(
            r.download_url().unwrap(),
            format!("/download/{}", r.task_id)
        );
    }

    #[test]
    fn terminal_states_reject_further_transitions() {
        let mut r = record();
        r.start().unwrap();
        r.fail("translation error: exit 1").unwrap();

        assert!(matches!(
            r.start(),
            Err(TaskError::InvalidTransition {
                from: TaskStatus::Failed,
                to: TaskStatus::Processing,
                ..
            })
        ));
        assert!(r.complete(PathBuf::from("x.pdf")).is_err());
        assert!(r.output_file().is_none());
        assert_eq!(r.message, "translation error: exit 1");
    }

    #[test]
    fn completing_without_processing_is_rejected() {
        let mut r = record();
        assert!(r.complete(PathBuf::from("x.pdf")).is_err());
        assert_eq!(r.status, TaskStatus::Pending);
        assert!(r.output_file().is_none());
    }

    #[test]
    fn completed_task_cannot_fail_afterwards() {
        let mut r = record();
        r.start().unwrap();
        r.complete(PathBuf::from("x.pdf")).unwrap();
        assert!(r.fail("late").is_err());
        assert_eq!(r.status, TaskStatus::Completed);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(TaskStatus::Processing).unwrap(),
            "processing"
        );
        assert_eq!(TaskStatus::Completed.to_string(), "completed");
    }

    #[test]
    fn task_id_round_trips_through_display() {
        let id = TaskId::new();
        let parsed: TaskId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<TaskId>().is_err());
        assert_eq!(id.short().len(), 8);
    }

    #[test]
    fn info_exposes_only_public_fields() {
        let r = record();
        let json = serde_json::to_value(r.info()).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["file_name"], "report.pdf");
        assert!(json["download_url"].is_null());
        assert!(json.get("input_file").is_none());
    }
}
