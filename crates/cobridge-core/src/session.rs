//! Conversion session
//!
//! Ties one translator and one [`ProcessingHistory`] to every workflow:
//! single translations, test generation, JUnit output, analysis and batch
//! pipelines. Pipelines created from the same session share its history,
//! so the average processing time covers the whole session.

use crate::analysis::{analyze, CodeAnalysis};
use crate::config::BridgeConfig;
use crate::error::BridgeResult;
use cobridge_batch::{BatchPipeline, ProcessingHistory};
use cobridge_testgen::{class_name_of, GeneratedCases, JUnitGenerator, TestCase, TestCaseGenerator};
use cobridge_translate::{
    translate_with_retry, ChatCompletionsTranslator, SharedTranslator, Translation,
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Entry point for all conversion workflows
#[derive(Debug, Clone)]
pub struct ConversionSession {
    config: BridgeConfig,
    translator: SharedTranslator,
    history: Arc<ProcessingHistory>,
}

impl ConversionSession {
    /// Create a session backed by the HTTP translator
    ///
    /// # Errors
    /// - `BridgeError::Config` / `BridgeError::Batch` if validation fails
    /// - `BridgeError::Translate` if the client cannot be built (e.g. no API key)
    pub fn from_config(config: BridgeConfig) -> BridgeResult<Self> {
        config.validate()?;
        let translator = ChatCompletionsTranslator::new(config.translator.clone())?;
        Ok(Self::with_translator(Arc::new(translator), config))
    }

    /// Create a session over any translator
    #[must_use]
    pub fn with_translator(translator: SharedTranslator, config: BridgeConfig) -> Self {
        Self {
            config,
            translator,
            history: Arc::new(ProcessingHistory::new()),
        }
    }

    /// Session configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Durations of every completed batch job in this session
    #[inline]
    #[must_use]
    pub fn history(&self) -> &Arc<ProcessingHistory> {
        &self.history
    }

    /// Translate one program, retrying on rate limits
    ///
    /// # Errors
    /// - `BridgeError::Translate` once the retry policy gives up
    #[instrument(skip_all, fields(source_len = source.len()))]
    pub async fn translate(&self, source: &str, user_story: &str) -> BridgeResult<Translation> {
        let translation =
            translate_with_retry(self.translator.as_ref(), self.config.retry, source, user_story).await?;
        info!(java_len = translation.translated_code.len(), "translation finished");
        Ok(translation)
    }

    /// Test cases for a program and its translation; never fails
    pub async fn generate_tests(&self, source: &str, translated: &str) -> GeneratedCases {
        TestCaseGenerator::new(Arc::clone(&self.translator))
            .generate(source, translated)
            .await
    }

    /// JUnit source for `cases`, named after the first class in `java`
    pub async fn generate_junit(&self, java: &str, cases: &[TestCase]) -> String {
        let class_name = class_name_of(java);
        JUnitGenerator::new(Arc::clone(&self.translator))
            .generate(&class_name, cases)
            .await
    }

    /// Metrics and suggestions for a translated program
    pub async fn analyze(&self, cobol: &str, java: &str) -> CodeAnalysis {
        analyze(self.translator.as_ref(), cobol, java).await
    }

    /// New batch pipeline sharing this session's history
    ///
    /// # Errors
    /// - `BridgeError::Batch` if the batch configuration is invalid
    pub fn batch_pipeline(&self) -> BridgeResult<BatchPipeline> {
        Ok(BatchPipeline::new(
            Arc::clone(&self.translator),
            Arc::clone(&self.history),
            self.config.batch.clone(),
        )?)
    }
}
