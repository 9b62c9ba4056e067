//! Delayed cleanup of finished and abandoned tasks

use super::registry::TaskRegistry;
use super::storage;
use crate::types::TaskId;
use std::sync::Arc;
use std::time::Duration;

/// Spawn a timer that expires `task_id` once `retention` has elapsed
///
/// The timer is never cancelled. If the task was deleted in the meantime the
/// wake-up finds no record and does nothing.
pub(crate) fn schedule(registry: Arc<TaskRegistry>, task_id: TaskId, retention: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(retention).await;
        expire(&registry, task_id).await;
    });
}

/// Remove a task and its files if it still exists
///
/// Returns whether a record was removed.
pub(crate) async fn expire(registry: &TaskRegistry, task_id: TaskId) -> bool {
    let Some(record) = registry.remove(task_id).await else {
        tracing::debug!(task_id = %task_id, "expiry found no task");
        return false;
    };

    tracing::info!(
        task_id = %task_id,
        status = %record.status,
        age_secs = (chrono::Utc::now() - record.created_at).num_seconds(),
        "task expired"
    );
    storage::remove_task_files(task_id, &record.input_file, &record.output_dir).await;
    true
}
