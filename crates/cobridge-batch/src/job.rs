//! Batch jobs and their lifecycle
//!
//! ```text
//! Pending → Processing → Completed
//!                      ↘ Failed
//! ```
//!
//! Terminal jobs never move again. Only the pipeline drives transitions;
//! intake can only create `Pending` jobs.

use crate::error::BatchError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use ulid::Ulid;

/// User story attached to jobs created from file intake
pub const DEFAULT_USER_STORY: &str = "Batch processing job";

/// Unique job identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JobId(pub Ulid);

impl JobId {
    /// Generate new job ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Job status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Waiting for the next queue run
    Pending,
    /// Translation in flight
    Processing,
    /// Translated
    Completed,
    /// Translation failed
    Failed,
}

impl JobStatus {
    /// Lowercase name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    /// Check if no further transition is possible
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Statuses reachable from `from` in one step
#[must_use]
pub fn allowed_transitions(from: JobStatus) -> &'static [JobStatus] {
    use JobStatus::*;
    match from {
        Pending => &[Processing],
        Processing => &[Completed, Failed],
        Completed | Failed => &[],
    }
}

/// A file handed to intake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// File name as uploaded, e.g. `PAYROLL.cob`
    pub name: String,
    /// UTF-8 contents
    pub contents: String,
}

impl SourceFile {
    /// Create from name and contents
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }

    /// Read a file from disk, keeping only its file name
    ///
    /// # Errors
    /// - `BatchError::Io` if the file cannot be read as UTF-8
    pub async fn read(path: impl AsRef<Path>) -> Result<Self, BatchError> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| BatchError::io_error(path, e))?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self { name, contents })
    }
}

/// One conversion job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchJob {
    id: JobId,
    file_name: String,
    status: JobStatus,
    cobol_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    java_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_story: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    processing_time: Option<u64>,
    enqueued_at: DateTime<Utc>,
}

impl BatchJob {
    /// Create a pending job for an uploaded file
    #[must_use]
    pub fn pending(file: SourceFile, user_story: impl Into<String>) -> Self {
        Self {
            id: JobId::new(),
            file_name: file.name,
            status: JobStatus::Pending,
            cobol_code: file.contents,
            java_code: None,
            error: None,
            user_story: Some(user_story.into()),
            processing_time: None,
            enqueued_at: Utc::now(),
        }
    }

    /// Job ID
    #[inline]
    #[must_use]
    pub fn id(&self) -> JobId {
        self.id
    }

    /// Uploaded file name
    #[inline]
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Current status
    #[inline]
    #[must_use]
    pub fn status(&self) -> JobStatus {
        self.status
    }

    /// COBOL source
    #[inline]
    #[must_use]
    pub fn cobol_code(&self) -> &str {
        &self.cobol_code
    }

    /// Translation, once completed
    #[inline]
    #[must_use]
    pub fn java_code(&self) -> Option<&str> {
        self.java_code.as_deref()
    }

    /// Failure message, once failed
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Context passed to the translator
    #[inline]
    #[must_use]
    pub fn user_story(&self) -> Option<&str> {
        self.user_story.as_deref()
    }

    /// Translation wall-clock time in milliseconds, once completed
    #[inline]
    #[must_use]
    pub fn processing_time_ms(&self) -> Option<u64> {
        self.processing_time
    }

    /// Intake time
    #[inline]
    #[must_use]
    pub fn enqueued_at(&self) -> DateTime<Utc> {
        self.enqueued_at
    }

    fn transition(&mut self, to: JobStatus) -> Result<(), BatchError> {
        if allowed_transitions(self.status).contains(&to) {
            self.status = to;
            Ok(())
        } else {
            Err(BatchError::IllegalTransition {
                job_id: self.id,
                from: self.status,
                to,
            })
        }
    }

    pub(crate) fn start(&mut self) -> Result<(), BatchError> {
        self.transition(JobStatus::Processing)
    }

    pub(crate) fn complete(&mut self, java_code: String, elapsed: Duration) -> Result<(), BatchError> {
        self.transition(JobStatus::Completed)?;
        self.java_code = Some(java_code);
        self.processing_time = Some(duration_ms(elapsed));
        Ok(())
    }

    pub(crate) fn fail(&mut self, error: String) -> Result<(), BatchError> {
        self.transition(JobStatus::Failed)?;
        self.error = Some(error);
        Ok(())
    }
}

pub(crate) fn duration_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
