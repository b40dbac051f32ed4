//! Error types for translation collaborators

/// Result alias for collaborator calls
pub type TranslateResult<T> = Result<T, TranslateError>;

/// Failure reported by a translation collaborator
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// Provider rejected the request because of its rate limit
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Provider answered with a non-success status
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the response body
        message: String,
    },

    /// Transport failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not have the expected shape
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Provider returned no completion text
    #[error("empty response from translator")]
    EmptyResponse,

    /// Client could not be configured
    #[error("configuration error: {0}")]
    Config(String),

    /// Any other collaborator failure
    #[error("{0}")]
    Failed(String),
}

impl TranslateError {
    /// Create an API error from an HTTP status and body message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a generic failure
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Check if this is a rate-limit condition
    ///
    /// Besides the dedicated variant, HTTP 429 and any message mentioning a
    /// rate limit count, since collaborators report it inconsistently.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        match self {
            Self::RateLimited(_) => true,
            Self::Api { status: 429, .. } => true,
            other => other.to_string().to_lowercase().contains("rate limit"),
        }
    }

    /// Check if a later attempt may succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => *status >= 500,
            Self::Config(_) | Self::InvalidResponse(_) => false,
            _ => self.is_rate_limited(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_classification() {
        assert!(TranslateError::RateLimited("slow down".into()).is_rate_limited());
        assert!(TranslateError::api(429, "too many requests").is_rate_limited());
        assert!(TranslateError::failed("Rate limit reached for gpt-4").is_rate_limited());
        assert!(!TranslateError::api(500, "boom").is_rate_limited());
        assert!(!TranslateError::EmptyResponse.is_rate_limited());
    }

    #[test]
    fn retryable_classification() {
        assert!(TranslateError::api(503, "unavailable").is_retryable());
        assert!(TranslateError::RateLimited("x".into()).is_retryable());
        assert!(!TranslateError::api(400, "bad request").is_retryable());
        assert!(!TranslateError::Config("no key".into()).is_retryable());
    }

    #[test]
    fn message_is_surfaced() {
        let err = TranslateError::failed("Failed to translate code. Please try again.");
        assert_eq!(err.to_string(), "Failed to translate code. Please try again.");
    }
}
