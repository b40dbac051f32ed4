//! Batch pipeline configuration

use crate::error::BatchError;
use crate::job::DEFAULT_USER_STORY;
use serde::{Deserialize, Serialize};

/// Batch pipeline settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Translations allowed in flight at once; 1 means strictly sequential
    pub max_parallel: usize,
    /// User story attached to every job created from intake
    pub default_user_story: String,
}

impl BatchConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With parallelism limit
    #[inline]
    #[must_use]
    pub fn with_max_parallel(mut self, max: usize) -> Self {
        self.max_parallel = max;
        self
    }

    /// With user story for new jobs
    #[inline]
    #[must_use]
    pub fn with_user_story(mut self, story: impl Into<String>) -> Self {
        self.default_user_story = story.into();
        self
    }

    /// Check settings
    ///
    /// # Errors
    /// - `BatchError::InvalidConfig` if `max_parallel` is zero
    pub fn validate(&self) -> Result<(), BatchError> {
        if self.max_parallel == 0 {
            return Err(BatchError::InvalidConfig(
                "max_parallel must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_parallel: 1,
            default_user_story: DEFAULT_USER_STORY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sequential() {
        let config = BatchConfig::default();
        assert_eq!(config.max_parallel, 1);
        assert_eq!(config.default_user_story, "Batch processing job");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_parallelism_rejected() {
        assert!(BatchConfig::new().with_max_parallel(0).validate().is_err());
    }
}
