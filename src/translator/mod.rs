//! External translator invocation
//!
//! The core abstraction is the [`Translator`] trait: given an input PDF, an
//! output directory and model settings, run a translation and report
//! success or failure with a diagnostic message. Implementations never
//! return errors; every failure is carried in the [`TranslationOutcome`].
//!
//! - [`CliTranslator`]: runs the external `babeldoc` binary
//! - [`UnavailableTranslator`]: stand-in when no binary can be found
//!
//! ## Usage
//!
//! ```no_run
//! use pdf_translate_api::translator::{CliTranslator, TranslationRequest, Translator};
//! use std::path::PathBuf;
//!
//! #[tokio::main]
//! async fn main() {
//!     let translator = CliTranslator::from_path().expect("babeldoc not found");
//!
//!     let request = TranslationRequest {
//!         input_file: PathBuf::from("uploads/report.pdf"),
//!         output_dir: PathBuf::from("output/report"),
//!         model: "gpt-4o-mini".into(),
//!         base_url: "https://api.openai.com/v1".into(),
//!         api_key: Some("sk-...".into()),
//!         lang_out: "ko".into(),
//!         no_dual: false,
//!     };
//!
//!     let outcome = translator.translate(&request).await;
//!     println!("success={} message={}", outcome.success, outcome.message);
//! }
//! ```

mod cli;
mod traits;
mod unavailable;

pub use cli::CliTranslator;
pub use traits::{TranslationOutcome, TranslationRequest, Translator};
pub use unavailable::UnavailableTranslator;

use crate::config::TranslatorConfig;
use std::sync::Arc;

/// Pick a translator implementation from configuration
///
/// An explicit `babeldoc_path` wins; otherwise PATH is searched when
/// `search_path` is set. Falls back to [`UnavailableTranslator`] so the
/// service still starts and reports a clear failure per task.
pub fn from_config(config: &TranslatorConfig) -> Arc<dyn Translator> {
    let translator: Arc<dyn Translator> = if let Some(ref path) = config.babeldoc_path {
        Arc::new(CliTranslator::new(path.clone()).with_tuning(config))
    } else if config.search_path {
        CliTranslator::from_path()
            .map(|t| Arc::new(t.with_tuning(config)) as Arc<dyn Translator>)
            .unwrap_or_else(|| Arc::new(UnavailableTranslator))
    } else {
        Arc::new(UnavailableTranslator)
    };

    tracing::info!(translator = translator.name(), "Translator initialized");
    translator
}
