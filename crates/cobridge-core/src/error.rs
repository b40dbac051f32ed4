//! Error types for cobridge Core

use cobridge_batch::BatchError;
use cobridge_translate::TranslateError;
use std::path::PathBuf;

/// Session-level error
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// Translation collaborator failed
    #[error("translation failed: {0}")]
    Translate(#[from] TranslateError),

    /// Batch pipeline failed
    #[error("batch failed: {0}")]
    Batch(#[from] BatchError),

    /// Configuration file could not be read
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        /// Configuration file path
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`crate::BridgeConfig`]
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration rejected by validation
    #[error("configuration error: {0}")]
    Config(String),

    /// Tracing subscriber could not be installed
    #[error("telemetry error: {0}")]
    Telemetry(String),
}

impl BridgeError {
    /// Create configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if the operation may succeed when repeated
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, BridgeError::Translate(e) if e.is_retryable())
    }
}

/// Result type for session operations
pub type BridgeResult<T> = Result<T, BridgeError>;
