//! Translator doubles and fixtures shared by unit and API tests

use super::TaskManager;
use crate::config::Config;
use crate::translator::{TranslationOutcome, TranslationRequest, Translator};
use crate::types::{TaskId, TaskInfo};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// Bytes written as a fake translated document
pub const FAKE_PDF: &[u8] = b"%PDF-1.4\n% translated\n%%EOF\n";

/// Writes `<stem>.<lang>.mono.pdf` into the output directory and succeeds
pub struct PdfWritingTranslator;

fn write_artifact(request: &TranslationRequest) -> std::io::Result<()> {
    let stem = request
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    std::fs::write(
        request
            .output_dir
            .join(format!("{}.{}.mono.pdf", stem, request.lang_out)),
        FAKE_PDF,
    )
}

#[async_trait]
impl Translator for PdfWritingTranslator {
    async fn translate(&self, request: &TranslationRequest) -> TranslationOutcome {
        match write_artifact(request) {
            Ok(()) => TranslationOutcome::succeeded(),
            Err(e) => TranslationOutcome::failed(format!("translation error: {e}")),
        }
    }

    fn name(&self) -> &'static str {
        "fake-pdf"
    }
}

/// Reports success without writing anything
pub struct NoArtifactTranslator;

#[async_trait]
impl Translator for NoArtifactTranslator {
    async fn translate(&self, _request: &TranslationRequest) -> TranslationOutcome {
        TranslationOutcome::succeeded()
    }

    fn name(&self) -> &'static str {
        "fake-no-artifact"
    }
}

/// Always fails with a fixed message
pub struct RejectingTranslator {
    message: String,
}

impl RejectingTranslator {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl Translator for RejectingTranslator {
    async fn translate(&self, _request: &TranslationRequest) -> TranslationOutcome {
        TranslationOutcome::failed(self.message.clone())
    }

    fn name(&self) -> &'static str {
        "fake-rejecting"
    }
}

/// Panics mid-translation
pub struct PanickingTranslator;

#[async_trait]
impl Translator for PanickingTranslator {
    async fn translate(&self, _request: &TranslationRequest) -> TranslationOutcome {
        panic!("translator exploded");
    }

    fn name(&self) -> &'static str {
        "fake-panicking"
    }
}

/// Blocks inside `translate` until released, then writes an artifact
///
/// Lets a test observe and interfere with a task while it is `processing`.
#[derive(Default)]
pub struct GatedTranslator {
    started: Notify,
    release: Notify,
}

impl GatedTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until a translation call has begun
    pub async fn wait_started(&self) {
        self.started.notified().await;
    }

    /// Let the blocked call finish
    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl Translator for GatedTranslator {
    async fn translate(&self, request: &TranslationRequest) -> TranslationOutcome {
        self.started.notify_one();
        self.release.notified().await;
        match write_artifact(request) {
            Ok(()) => TranslationOutcome::succeeded(),
            Err(e) => TranslationOutcome::failed(format!("translation error: {e}")),
        }
    }

    fn name(&self) -> &'static str {
        "fake-gated"
    }
}

/// Config rooted in `dir` with the given retention window
pub fn test_config(dir: &Path, retention: Duration) -> Config {
    let mut config = Config::default();
    config.storage.upload_dir = dir.join("uploads");
    config.storage.output_dir = dir.join("output");
    config.tasks.retention = retention;
    config.api.swagger_ui = false;
    config
}

/// Manager over `dir` with a long retention window
pub async fn test_manager(dir: &Path, translator: Arc<dyn Translator>) -> TaskManager {
    TaskManager::new(test_config(dir, Duration::from_secs(3600)), translator)
        .await
        .expect("failed to create test manager")
}

/// Poll until the task reaches a terminal status, panicking after a few seconds
pub async fn wait_until_terminal(manager: &TaskManager, id: TaskId) -> TaskInfo {
    for _ in 0..200 {
        let info = manager.status(id).await.expect("task disappeared while waiting");
        if info.status.is_terminal() {
            return info;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("task {id} did not finish in time");
}
