//! Traits and types for external translation

use async_trait::async_trait;
use std::path::PathBuf;

/// Everything one translation run needs
///
/// The credential lives here only for the duration of a single task; it is
/// redacted from `Debug` output.
#[derive(Clone)]
pub struct TranslationRequest {
    /// Persisted upload
    pub input_file: PathBuf,
    /// Directory the translator writes its artifacts into
    pub output_dir: PathBuf,
    /// Model name
    pub model: String,
    /// OpenAI-compatible endpoint base URL
    pub base_url: String,
    /// Endpoint credential
    pub api_key: Option<String>,
    /// Target language code
    pub lang_out: String,
    /// Skip the bilingual side-by-side output
    pub no_dual: bool,
}

impl std::fmt::Debug for TranslationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationRequest")
            .field("input_file", &self.input_file)
            .field("output_dir", &self.output_dir)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("lang_out", &self.lang_out)
            .field("no_dual", &self.no_dual)
            .finish()
    }
}

/// Result of a translation run
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOutcome {
    /// Whether the translator reported success (exit status zero)
    pub success: bool,
    /// Human-readable result or captured diagnostics
    pub message: String,
}

impl TranslationOutcome {
    /// A successful run
    pub fn succeeded() -> Self {
        Self {
            success: true,
            message: "translation completed".to_string(),
        }
    }

    /// A failed run with its diagnostic text
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Trait for running one translation
///
/// A success only means the process exited cleanly. Callers must still check
/// that an artifact was actually produced in `output_dir`.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `request.input_file` into `request.output_dir`
    ///
    /// Never panics or returns an error; failures are reported through
    /// [`TranslationOutcome::failed`]. There are no retries.
    async fn translate(&self, request: &TranslationRequest) -> TranslationOutcome;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
