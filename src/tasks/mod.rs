//! Translation task lifecycle split into focused submodules.
//!
//! The `TaskManager` struct owns the task registry and the translator, and
//! its methods are organized by concern:
//! - [`registry`] - In-memory task records
//! - [`gateway`] - Boundary operations (submit, status, download, list, delete)
//! - [`executor`] - Background translation of one task
//! - [`expiry`] - Delayed cleanup after the retention window
//! - [`storage`] - Upload and output paths on disk

mod executor;
mod expiry;
mod gateway;
pub mod registry;
pub mod storage;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

pub use registry::TaskRegistry;

use crate::config::Config;
use crate::error::Result;
use crate::translator::Translator;
use std::sync::Arc;

/// Owner of every live translation task (cloneable - all fields are Arc-wrapped)
///
/// Built once at startup and shared with the HTTP layer. Background jobs and
/// expiry timers hold clones of the registry, never the manager itself.
#[derive(Clone)]
pub struct TaskManager {
    /// Task records, the only shared mutable state
    pub(crate) registry: Arc<TaskRegistry>,
    /// External translator (trait object so tests can swap in doubles)
    pub(crate) translator: Arc<dyn Translator>,
    /// Static configuration
    pub(crate) config: Arc<Config>,
}

impl TaskManager {
    /// Validate configuration, create the storage roots and build the manager
    pub async fn new(config: Config, translator: Arc<dyn Translator>) -> Result<Self> {
        config.validate()?;
        storage::ensure_roots(&config.storage.upload_dir, &config.storage.output_dir).await?;

        tracing::info!(
            upload_dir = ?config.storage.upload_dir,
            output_dir = ?config.storage.output_dir,
            retention_secs = config.tasks.retention.as_secs(),
            translator = translator.name(),
            "task manager ready"
        );

        Ok(Self {
            registry: Arc::new(TaskRegistry::new()),
            translator,
            config: Arc::new(config),
        })
    }

    /// The configuration the manager was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Name of the active translator implementation
    pub fn translator_name(&self) -> &'static str {
        self.translator.name()
    }

    /// Number of live tasks
    pub async fn task_count(&self) -> usize {
        self.registry.len().await
    }
}
