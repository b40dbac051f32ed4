//! Translator collaborator seam

use crate::error::TranslateError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Output of one translation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    /// Translated (or generated) text
    pub translated_code: String,
    /// Optional commentary from the collaborator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Translation {
    /// Create translation without commentary
    #[inline]
    #[must_use]
    pub fn new(translated_code: impl Into<String>) -> Self {
        Self {
            translated_code: translated_code.into(),
            explanation: None,
        }
    }
}

/// External service that turns COBOL into Java
///
/// The same collaborator also answers free-form prompts (test-case and
/// suggestion generation). Implementations enforce their own timeouts.
#[async_trait]
pub trait Translator: Send + Sync + std::fmt::Debug {
    /// Translate `source` using `context` (user story) as guidance
    async fn translate(&self, source: &str, context: &str) -> Result<Translation, TranslateError>;

    /// Answer a free-form prompt
    ///
    /// Defaults to a translation call with empty context.
    async fn complete(&self, prompt: &str) -> Result<Translation, TranslateError> {
        self.translate(prompt, "").await
    }
}

/// Shared handle to a translator
pub type SharedTranslator = Arc<dyn Translator>;
