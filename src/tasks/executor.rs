//! Background execution of one translation job

use super::registry::TaskRegistry;
use super::storage;
use crate::error::{Error, Result};
use crate::translator::{TranslationRequest, Translator};
use crate::types::TaskId;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// Run a task through the translator and record the result
///
/// Nothing escapes this function: errors and panics inside the pipeline are
/// recorded as a `failed` status (if the task still exists), and the input
/// file is always removed at the end.
pub(crate) async fn run_job(
    registry: Arc<TaskRegistry>,
    translator: Arc<dyn Translator>,
    task_id: TaskId,
    request: TranslationRequest,
    artifact_extension: String,
) {
    let result = AssertUnwindSafe(process(
        &registry,
        translator.as_ref(),
        task_id,
        &request,
        &artifact_extension,
    ))
    .catch_unwind()
    .await;

    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            tracing::error!(task_id = %task_id, error = %e, "translation job failed");
            record_failure(&registry, task_id, format!("translation error: {}", e)).await;
        }
        Err(panic) => {
            let reason = panic_message(panic.as_ref());
            tracing::error!(task_id = %task_id, reason = %reason, "translation job panicked");
            record_failure(&registry, task_id, format!("translation error: {}", reason)).await;
        }
    }

    storage::remove_input_file(task_id, &request.input_file).await;
}

async fn process(
    registry: &TaskRegistry,
    translator: &dyn Translator,
    task_id: TaskId,
    request: &TranslationRequest,
    artifact_extension: &str,
) -> Result<()> {
    match registry.update(task_id, |r| r.start()).await {
        None => {
            tracing::debug!(task_id = %task_id, "task removed before processing started");
            return Ok(());
        }
        Some(result) => result?,
    }

    tracing::info!(task_id = %task_id, translator = translator.name(), "translation started");
    let outcome = translator.translate(request).await;

    if !registry.contains(task_id).await {
        // Deleted or expired while the translator ran; drop whatever it wrote
        tracing::info!(task_id = %task_id, "task removed during translation, discarding result");
        storage::remove_output_dir(task_id, &request.output_dir).await;
        return Ok(());
    }

    if !outcome.success {
        tracing::warn!(task_id = %task_id, message = %outcome.message, "translation failed");
        record_failure(registry, task_id, outcome.message).await;
        return Ok(());
    }

    let artifact = storage::find_latest_artifact(&request.output_dir, artifact_extension)
        .await
        .map_err(|e| {
            Error::Other(format!(
                "failed to scan output directory {}: {}",
                request.output_dir.display(),
                e
            ))
        })?;

    let Some(path) = artifact else {
        tracing::warn!(task_id = %task_id, output = ?request.output_dir, "translator produced no artifact");
        record_failure(registry, task_id, "translation file not found".to_string()).await;
        return Ok(());
    };

    tracing::info!(task_id = %task_id, artifact = ?path, "translation completed");
    if let Some(result) = registry.update(task_id, |r| r.complete(path)).await {
        result?;
    }
    Ok(())
}

/// Mark a task `failed`, unless it is gone or already terminal
async fn record_failure(registry: &TaskRegistry, task_id: TaskId, message: String) {
    match registry.update(task_id, |r| r.fail(message)).await {
        None => tracing::debug!(task_id = %task_id, "task removed, failure not recorded"),
        Some(Err(e)) => tracing::warn!(task_id = %task_id, error = %e, "could not record failure"),
        Some(Ok(())) => {}
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unexpected panic".to_string()
    }
}
