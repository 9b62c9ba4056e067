//! CLI-based translator using the external babeldoc binary

use super::traits::{TranslationOutcome, TranslationRequest, Translator};
use crate::config::TranslatorConfig;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Output;
use tokio::process::Command;

/// CLI-based translator using the external `babeldoc` binary
///
/// Each call spawns one babeldoc process and waits for it to exit. The wait
/// is asynchronous, so the calling tokio task yields instead of blocking a
/// worker thread for the length of the translation.
///
/// # Examples
///
/// ```no_run
/// use pdf_translate_api::translator::CliTranslator;
/// use std::path::PathBuf;
///
/// // Create with explicit path
/// let translator = CliTranslator::new(PathBuf::from("/usr/local/bin/babeldoc"));
///
/// // Or auto-discover from PATH
/// let translator = CliTranslator::from_path().expect("babeldoc not found in PATH");
/// ```
pub struct CliTranslator {
    binary_path: PathBuf,
    max_pages_per_part: u32,
    min_text_length: u32,
    watermark_output_mode: String,
}

impl CliTranslator {
    /// Create a new CLI translator with an explicit binary path
    pub fn new(binary_path: PathBuf) -> Self {
        let defaults = TranslatorConfig::default();
        Self {
            binary_path,
            max_pages_per_part: defaults.max_pages_per_part,
            min_text_length: defaults.min_text_length,
            watermark_output_mode: defaults.watermark_output_mode,
        }
    }

    /// Attempt to find babeldoc in PATH
    pub fn from_path() -> Option<Self> {
        which::which("babeldoc").ok().map(Self::new)
    }

    /// Apply the tuning flags from configuration
    pub fn with_tuning(mut self, config: &TranslatorConfig) -> Self {
        self.max_pages_per_part = config.max_pages_per_part;
        self.min_text_length = config.min_text_length;
        self.watermark_output_mode = config.watermark_output_mode.clone();
        self
    }

    /// Command-line arguments for one run
    pub(crate) fn build_args(&self, request: &TranslationRequest) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--files".into(),
            request.input_file.clone().into_os_string(),
            "--openai".into(),
            "--openai-model".into(),
            request.model.clone().into(),
            "--openai-base-url".into(),
            request.base_url.clone().into(),
        ];

        if let Some(ref key) = request.api_key {
            args.push("--openai-api-key".into());
            args.push(key.into());
        }

        args.extend([
            "--lang-out".into(),
            request.lang_out.clone().into(),
            "--output".into(),
            request.output_dir.clone().into_os_string(),
            "--skip-clean".into(),
            "--watermark-output-mode".into(),
            self.watermark_output_mode.clone().into(),
            "--min-text-length".into(),
            self.min_text_length.to_string().into(),
            "--max-pages-per-part".into(),
            self.max_pages_per_part.to_string().into(),
        ]);

        if request.no_dual {
            args.push("--no-dual".into());
        }

        args
    }
}

/// Render the failure diagnostics of a finished process
fn failure_diagnostic(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let detail = if !stderr.trim().is_empty() {
        stderr.trim().to_string()
    } else {
        stdout.trim().to_string()
    };

    if detail.is_empty() {
        format!("babeldoc exited with {}", output.status)
    } else {
        format!("babeldoc exited with {}: {}", output.status, detail)
    }
}

#[async_trait]
impl Translator for CliTranslator {
    async fn translate(&self, request: &TranslationRequest) -> TranslationOutcome {
        tracing::info!(
            binary = ?self.binary_path,
            input = ?request.input_file,
            output = ?request.output_dir,
            model = %request.model,
            lang_out = %request.lang_out,
            no_dual = request.no_dual,
            "running babeldoc"
        );

        let output = match Command::new(&self.binary_path)
            .args(self.build_args(request))
            .output()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                tracing::error!(binary = ?self.binary_path, error = %e, "failed to execute babeldoc");
                return TranslationOutcome::failed(format!(
                    "translation error: failed to execute babeldoc: {}",
                    e
                ));
            }
        };

        tracing::debug!(
            status = %output.status,
            stdout = %String::from_utf8_lossy(&output.stdout),
            stderr = %String::from_utf8_lossy(&output.stderr),
            "babeldoc finished"
        );

        if output.status.success() {
            TranslationOutcome::succeeded()
        } else {
            let diagnostic = failure_diagnostic(&output);
            tracing::warn!(diagnostic = %diagnostic, "babeldoc failed");
            TranslationOutcome::failed(format!("translation error: {}", diagnostic))
        }
    }

    fn name(&self) -> &'static str {
        "cli-babeldoc"
    }
}
