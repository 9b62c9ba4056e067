//! Boundary operations exposed to the HTTP layer

use super::{TaskManager, executor, expiry, storage};
use crate::error::{Error, Result, TaskError};
use crate::translator::TranslationRequest;
use crate::types::{
    TaskId, TaskInfo, TaskList, TaskRecord, TaskStatus, TranslateOptions, TranslationResponse,
};
use std::path::PathBuf;

impl TaskManager {
    /// Accept an upload and start translating it in the background
    ///
    /// Returns as soon as the upload is on disk and the `pending` record is
    /// registered. Nothing is created when validation or storage fails.
    pub async fn submit(
        &self,
        file_name: &str,
        content: &[u8],
        options: TranslateOptions,
    ) -> Result<TranslationResponse> {
        let extension = &self.config.tasks.upload_extension;
        if !file_name.ends_with(extension.as_str()) {
            return Err(Error::Validation(format!(
                "only {} files are supported",
                extension.trim_start_matches('.')
            )));
        }
        let file_name = storage::sanitize_file_name(file_name)
            .ok_or_else(|| Error::Validation("a file name is required".into()))?;

        let lang_out = match options.lang_out.trim() {
            "" => self.config.tasks.default_lang_out.clone(),
            lang => lang.to_string(),
        };

        let task_id = TaskId::new();
        let input_file = storage::upload_path(&self.config.storage.upload_dir, &file_name);
        let output_dir = storage::output_dir_for(&self.config.storage.output_dir, &file_name, task_id);

        storage::persist_upload(&input_file, content).await?;
        if let Err(e) = storage::create_output_dir(&output_dir).await {
            storage::remove_input_file(task_id, &input_file).await;
            return Err(e);
        }

        let record = TaskRecord::new(task_id, file_name.clone(), input_file.clone(), output_dir.clone());
        if !self.registry.insert(record).await {
            storage::remove_task_files(task_id, &input_file, &output_dir).await;
            return Err(Error::Other(format!("task id collision for {}", task_id)));
        }

        tracing::info!(
            task_id = %task_id,
            file_name = %file_name,
            bytes = content.len(),
            lang_out = %lang_out,
            no_dual = options.no_dual,
            "translation task submitted"
        );

        let request = TranslationRequest {
            input_file,
            output_dir,
            model: self.config.translator.model.clone(),
            base_url: self.config.translator.base_url.clone(),
            api_key: self.config.translator.api_key.clone(),
            lang_out,
            no_dual: options.no_dual,
        };

        tokio::spawn(executor::run_job(
            self.registry.clone(),
            self.translator.clone(),
            task_id,
            request,
            extension.clone(),
        ));
        expiry::schedule(self.registry.clone(), task_id, self.config.tasks.retention);

        Ok(TranslationResponse {
            task_id,
            status: TaskStatus::Pending,
            message: "translation started".to_string(),
            download_url: None,
        })
    }

    /// Public view of one task
    pub async fn status(&self, task_id: TaskId) -> Result<TaskInfo> {
        self.registry
            .get(task_id)
            .await
            .map(|record| record.info())
            .ok_or_else(|| not_found(task_id))
    }

    /// Location of a completed task's artifact
    ///
    /// Fails with not-found for unknown tasks, not-completed before the
    /// translation finished, and artifact-missing if the file left the disk.
    pub async fn download(&self, task_id: TaskId) -> Result<PathBuf> {
        let record = self
            .registry
            .get(task_id)
            .await
            .ok_or_else(|| not_found(task_id))?;

        if record.status != TaskStatus::Completed {
            return Err(TaskError::NotCompleted {
                id: task_id.to_string(),
                status: record.status,
            }
            .into());
        }

        let path = record.output_file().cloned();
        match path {
            Some(path) if tokio::fs::try_exists(&path).await.unwrap_or(false) => Ok(path),
            path => {
                tracing::warn!(task_id = %task_id, path = ?path, "completed task has no artifact on disk");
                Err(TaskError::ArtifactMissing {
                    id: task_id.to_string(),
                    path,
                }
                .into())
            }
        }
    }

    /// Snapshot of every live task
    pub async fn list(&self) -> TaskList {
        TaskList {
            tasks: self.registry.snapshot().await,
        }
    }

    /// Remove a task and its files
    ///
    /// Idempotent. Returns whether a task was actually removed. A job that
    /// is still translating keeps running but can no longer write its result.
    pub async fn delete(&self, task_id: TaskId) -> bool {
        let Some(record) = self.registry.remove(task_id).await else {
            tracing::debug!(task_id = %task_id, "delete for unknown task");
            return false;
        };

        tracing::info!(task_id = %task_id, status = %record.status, "task deleted");
        storage::remove_task_files(task_id, &record.input_file, &record.output_dir).await;
        true
    }
}

fn not_found(task_id: TaskId) -> Error {
    TaskError::NotFound {
        id: task_id.to_string(),
    }
    .into()
}
