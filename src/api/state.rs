//! Application state for the API server

use crate::{Config, TaskManager};
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// This struct is cloned for each request (cheap Arc clones) and provides
/// access to the task manager and the configuration it was built with.
#[derive(Clone)]
pub struct AppState {
    /// Owner of all translation tasks
    pub manager: TaskManager,

    /// Configuration (read-only)
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState around a task manager
    pub fn new(manager: TaskManager) -> Self {
        let config = manager.config.clone();
        Self { manager, config }
    }
}
