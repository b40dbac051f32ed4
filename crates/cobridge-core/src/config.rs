//! Session configuration
//!
//! One TOML document with a table per concern:
//!
//! ```toml
//! [translator]
//! model = "gpt-4"
//! temperature = 0.3
//!
//! [batch]
//! max_parallel = 1
//!
//! [logging]
//! level = "info"
//! json = false
//! ```
//!
//! Every table and key is optional. The API key may be set in the
//! `[translator]` table but is never serialized back out; when absent it is
//! taken from `COBRIDGE_API_KEY` or `OPENAI_API_KEY`.

use crate::error::{BridgeError, BridgeResult};
use cobridge_batch::BatchConfig;
use cobridge_translate::{RetryPolicy, TranslatorConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete session configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Translation collaborator
    pub translator: TranslatorConfig,
    /// Rate-limit retry for single translations
    pub retry: RetryPolicy,
    /// Batch pipeline
    pub batch: BatchConfig,
    /// Logging
    pub logging: LoggingConfig,
}

impl BridgeConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document
    ///
    /// # Errors
    /// - `BridgeError::ConfigParse` for malformed TOML or mistyped keys
    pub fn from_toml_str(text: &str) -> BridgeResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    /// - `BridgeError::ConfigRead` if the file cannot be read
    /// - `BridgeError::ConfigParse` if it does not parse
    pub fn load(path: impl AsRef<Path>) -> BridgeResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| BridgeError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// With translator settings
    #[inline]
    #[must_use]
    pub fn with_translator(mut self, translator: TranslatorConfig) -> Self {
        self.translator = translator;
        self
    }

    /// With batch settings
    #[inline]
    #[must_use]
    pub fn with_batch(mut self, batch: BatchConfig) -> Self {
        self.batch = batch;
        self
    }

    /// With retry policy
    #[inline]
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// With log filter
    #[inline]
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }

    /// Fill the API key from the environment when not configured
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        self.translator = self.translator.with_env_overrides();
        self
    }

    /// Check settings
    ///
    /// # Errors
    /// - `BridgeError::Config` for out-of-range values
    /// - `BridgeError::Batch` if the batch table is invalid
    pub fn validate(&self) -> BridgeResult<()> {
        if self.translator.base_url.trim().is_empty() {
            return Err(BridgeError::config("translator.base_url must not be empty"));
        }
        if self.translator.model.trim().is_empty() {
            return Err(BridgeError::config("translator.model must not be empty"));
        }
        if !(0.0..=2.0).contains(&self.translator.temperature) {
            return Err(BridgeError::config("translator.temperature must be within 0..=2"));
        }
        if self.translator.timeout_ms == 0 {
            return Err(BridgeError::config("translator.timeout_ms must be positive"));
        }
        if self.retry.max_attempts == 0 {
            return Err(BridgeError::config("retry.max_attempts must be at least 1"));
        }
        self.batch.validate()?;
        Ok(())
    }
}
