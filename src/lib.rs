//! # pdf-translate-api
//!
//! HTTP service that accepts PDF uploads, translates them in the background
//! with the BabelDOC command-line tool, and serves the translated document
//! for download.
//!
//! ## Design
//!
//! - **Asynchronous jobs** - Submitting returns a task id at once; clients poll
//!   `GET /status/:task_id` and download when the task is `completed`
//! - **In-memory registry** - Task records live in one [`TaskRegistry`] owned
//!   by the [`TaskManager`]; nothing survives a restart
//! - **Bounded lifetime** - Every task and its files are removed after a
//!   retention window (4 hours by default) or on explicit delete
//! - **Pluggable translator** - The external tool sits behind the
//!   [`translator::Translator`] trait
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_translate_api::{Config, TaskManager, TranslateOptions, translator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env();
//!     let translator = translator::from_config(&config.translator);
//!     let manager = TaskManager::new(config, translator).await?;
//!
//!     let pdf = std::fs::read("report.pdf")?;
//!     let response = manager
//!         .submit("report.pdf", &pdf, TranslateOptions::new("ko"))
//!         .await?;
//!     println!("task {} is {}", response.task_id, response.status);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// REST API module
pub mod api;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Task lifecycle: registry, executor, expiry, boundary operations
pub mod tasks;
/// External translator invocation
pub mod translator;
/// Core types
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{ApiError, Error, ErrorDetail, Result, TaskError, ToHttpStatus};
pub use tasks::{TaskManager, TaskRegistry};
pub use translator::{CliTranslator, TranslationOutcome, Translator, UnavailableTranslator};
pub use types::{
    TaskId, TaskInfo, TaskList, TaskRecord, TaskStatus, TranslateOptions, TranslationResponse,
};

/// Build the task manager from configuration and serve the API until a
/// termination signal arrives.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
///
/// # Example
///
/// ```no_run
/// use pdf_translate_api::{Config, run_with_shutdown};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     run_with_shutdown(Config::from_env()).await?;
///     Ok(())
/// }
/// ```
pub async fn run_with_shutdown(config: Config) -> Result<()> {
    let translator = translator::from_config(&config.translator);
    let manager = TaskManager::new(config, translator).await?;
    api::start_api_server(manager).await
}

#[cfg(unix)]
pub(crate) async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Set up signal handlers - these may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Err(e), _) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            if let Ok(mut sigint) = signal(SignalKind::interrupt()) {
                sigint.recv().await;
                tracing::info!("Received SIGINT signal (Ctrl+C)");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
        (_, Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
                sigterm.recv().await;
                tracing::info!("Received SIGTERM signal");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
    }
}

#[cfg(not(unix))]
pub(crate) async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}
