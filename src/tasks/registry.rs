//! In-memory task registry
//!
//! The registry is the single source of truth for task status. Every access
//! takes the lock for exactly one operation and releases it before returning,
//! so nothing ever holds it across the translator call or filesystem work.

use crate::types::{TaskId, TaskRecord};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

/// Concurrency-safe map from task id to task record
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: RwLock<HashMap<TaskId, TaskRecord>>,
}

impl TaskRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new record
    ///
    /// Returns `false` (and leaves the existing record untouched) if a record
    /// with the same id is already present.
    pub async fn insert(&self, record: TaskRecord) -> bool {
        let mut tasks = self.tasks.write().await;
        if tasks.contains_key(&record.task_id) {
            return false;
        }
        tasks.insert(record.task_id, record);
        true
    }

    /// Copy of the current record
    pub async fn get(&self, id: TaskId) -> Option<TaskRecord> {
        self.tasks.read().await.get(&id).cloned()
    }

    /// Whether a record exists
    pub async fn contains(&self, id: TaskId) -> bool {
        self.tasks.read().await.contains_key(&id)
    }

    /// Mutate a record in place
    ///
    /// Returns `None` without calling `f` when the record is absent; an absent
    /// record is never recreated.
    pub async fn update<T>(&self, id: TaskId, f: impl FnOnce(&mut TaskRecord) -> T) -> Option<T> {
        let mut tasks = self.tasks.write().await;
        tasks.get_mut(&id).map(f)
    }

    /// Remove a record, returning it if it was present
    pub async fn remove(&self, id: TaskId) -> Option<TaskRecord> {
        self.tasks.write().await.remove(&id)
    }

    /// Point-in-time copy of every record, ordered by id
    pub async fn snapshot(&self) -> BTreeMap<TaskId, TaskRecord> {
        self.tasks
            .read()
            .await
            .iter()
            .map(|(id, record)| (*id, record.clone()))
            .collect()
    }

    /// Number of live records
    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    /// Whether the registry has no records
    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }
}
