//! Translator client configuration

use serde::{Deserialize, Serialize};

/// Environment variables consulted for the API key, in order
pub const API_KEY_VARS: [&str; 2] = ["COBRIDGE_API_KEY", "OPENAI_API_KEY"];

/// Default system instruction for translation calls
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an expert COBOL to Java translator. \
Respond only with the translated Java code, no explanations or markdown.";

/// Chat-completions client settings
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// API root, without the `/chat/completions` suffix
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Bearer token; never serialized
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Sampling temperature
    pub temperature: f32,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    /// System instruction sent with every translation
    pub system_prompt: String,
}

impl TranslatorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With API key
    #[inline]
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// With base URL
    #[inline]
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// With model
    #[inline]
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Fill a missing API key from the environment
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if self.api_key.is_none() {
            self.api_key = API_KEY_VARS
                .iter()
                .find_map(|var| std::env::var(var).ok())
                .filter(|key| !key.trim().is_empty());
        }
        self
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4".to_string(),
            api_key: None,
            temperature: 0.3,
            timeout_ms: 60_000,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl std::fmt::Debug for TranslatorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslatorConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("temperature", &self.temperature)
            .field("timeout_ms", &self.timeout_ms)
            .finish_non_exhaustive()
    }
}
