//! Batch statistics
//!
//! Counters are derived from the current job list. The average processing
//! time is not: it is the mean over every completed translation recorded in
//! the session's [`ProcessingHistory`], including jobs no longer listed.

use crate::job::{duration_ms, BatchJob, JobStatus};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Session-wide record of completed translation durations
///
/// Grows monotonically; there is no reset. Create one per session and share
/// it by `Arc` with every pipeline that should contribute.
#[derive(Debug, Default)]
pub struct ProcessingHistory {
    samples_ms: Mutex<Vec<u64>>,
}

impl ProcessingHistory {
    /// Create empty history
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one duration sample
    pub fn record(&self, elapsed: Duration) {
        self.samples_ms.lock().push(duration_ms(elapsed));
    }

    /// Mean of all samples in milliseconds; 0 when empty
    #[must_use]
    pub fn mean(&self) -> f64 {
        let samples = self.samples_ms.lock();
        if samples.is_empty() {
            return 0.0;
        }
        let total: u128 = samples.iter().map(|&ms| u128::from(ms)).sum();
        total as f64 / samples.len() as f64
    }

    /// Number of samples
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples_ms.lock().len()
    }

    /// Check if nothing was recorded yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples_ms.lock().is_empty()
    }
}

/// Summary of a job collection
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStats {
    /// All jobs
    pub total: usize,
    /// Jobs in `completed`
    pub completed: usize,
    /// Jobs in `failed`
    pub failed: usize,
    /// Jobs in `processing`
    pub in_progress: usize,
    /// Session-wide mean translation time in milliseconds
    pub average_processing_time: f64,
}

/// Compute statistics for `jobs` against the session history
#[must_use]
pub fn aggregate(jobs: &[BatchJob], history: &ProcessingHistory) -> BatchStats {
    let count = |status: JobStatus| jobs.iter().filter(|j| j.status() == status).count();
    BatchStats {
        total: jobs.len(),
        completed: count(JobStatus::Completed),
        failed: count(JobStatus::Failed),
        in_progress: count(JobStatus::Processing),
        average_processing_time: history.mean(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::SourceFile;

    #[test]
    fn empty_history_mean_is_zero() {
        let history = ProcessingHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.mean(), 0.0);
    }

    #[test]
    fn mean_of_samples() {
        let history = ProcessingHistory::new();
        history.record(Duration::from_millis(10));
        history.record(Duration::from_millis(20));
        history.record(Duration::from_millis(60));
        assert_eq!(history.len(), 3);
        assert_eq!(history.mean(), 30.0);
    }

    #[test]
    fn counters_follow_statuses() {
        let history = ProcessingHistory::new();
        let mut jobs: Vec<_> = (0..4)
            .map(|i| BatchJob::pending(SourceFile::new(format!("{i}.cob"), ""), "story"))
            .collect();
        jobs[0].start().unwrap();
        jobs[1].start().unwrap();
        jobs[1].complete("x".into(), Duration::from_millis(5)).unwrap();
        jobs[2].start().unwrap();
        jobs[2].fail("y".into()).unwrap();

        let stats = aggregate(&jobs, &history);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.failed, 1);
    }

    #[test]
    fn average_is_cumulative_not_per_snapshot() {
        let history = ProcessingHistory::new();
        history.record(Duration::from_millis(100));
        let stats = aggregate(&[], &history);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.average_processing_time, 100.0);
    }
}
