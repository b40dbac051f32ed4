//! Rate-limit retry for interactive translations
//!
//! The batch pipeline never retries; this is for single, user-driven calls.

use crate::error::TranslateError;
use crate::translator::{Translation, Translator};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Linear backoff applied to rate-limited calls only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts including the first
    pub max_attempts: u32,
    /// Delay before attempt `n + 1` is `base_delay_ms * n`
    pub base_delay_ms: u64,
}

impl RetryPolicy {
    /// Policy that never retries
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay_ms: 0,
        }
    }

    /// Delay to wait after the given failed attempt (1-based)
    #[inline]
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.base_delay_ms.saturating_mul(u64::from(attempt)))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_ms: 2_000,
        }
    }
}

/// Translate, retrying while the collaborator reports a rate limit
///
/// # Errors
/// The last error once attempts are exhausted, or the first error that is
/// not a rate limit.
pub async fn translate_with_retry(
    translator: &dyn Translator,
    policy: RetryPolicy,
    source: &str,
    context: &str,
) -> Result<Translation, TranslateError> {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match translator.translate(source, context).await {
            Ok(translation) => return Ok(translation),
            Err(e) if e.is_rate_limited() && attempt < max_attempts => {
                let delay = policy.delay_after(attempt);
                warn!(attempt, max_attempts, delay_ms = delay.as_millis() as u64, "rate limited, retrying");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
