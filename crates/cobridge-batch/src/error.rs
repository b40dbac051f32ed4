//! Error types for the batch pipeline
//!
//! Translation failures are not errors here: they become `failed` jobs.
//! What remains are lifecycle violations, lookups and export I/O.

use crate::job::{JobId, JobStatus};
use std::path::PathBuf;

/// Batch pipeline error
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// Job status change not allowed by the lifecycle
    #[error("illegal transition for job {job_id}: {from} -> {to}")]
    IllegalTransition {
        /// Job that was asked to move
        job_id: JobId,
        /// Status the job was in
        from: JobStatus,
        /// Requested status
        to: JobStatus,
    },

    /// No job with this id
    #[error("job not found: {0}")]
    JobNotFound(JobId),

    /// Reading a source file or writing an export failed
    #[error("io error on {}: {source}", path.display())]
    Io {
        /// File being read or written
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Export serialization failed
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration rejected
    #[error("invalid batch configuration: {0}")]
    InvalidConfig(String),
}

impl BatchError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_job_and_path() {
        let job_id = JobId::new();
        let err = BatchError::IllegalTransition {
            job_id,
            from: JobStatus::Completed,
            to: JobStatus::Processing,
        };
        assert_eq!(
            err.to_string(),
            format!("illegal transition for job {job_id}: completed -> processing")
        );

        let err = BatchError::io_error(
            "out/A.java",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "io error on out/A.java: denied");
    }
}
