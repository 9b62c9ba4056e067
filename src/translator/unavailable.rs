//! Translator used when no babeldoc binary is available

use super::traits::{TranslationOutcome, TranslationRequest, Translator};
use async_trait::async_trait;

/// Stand-in translator when babeldoc cannot be found
///
/// The service still starts; every task fails with a message telling the
/// operator how to configure the binary.
pub struct UnavailableTranslator;

#[async_trait]
impl Translator for UnavailableTranslator {
    async fn translate(&self, _request: &TranslationRequest) -> TranslationOutcome {
        TranslationOutcome::failed(
            "translation error: babeldoc binary not found. \
             Set BABELDOC_PATH or ensure babeldoc is in PATH.",
        )
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }
}
