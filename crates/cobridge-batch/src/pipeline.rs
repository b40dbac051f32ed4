//! Batch translation pipeline
//!
//! Owns the job list and is its only writer. Each queue run walks the jobs
//! that are pending at the start of the run, in upload order:
//!
//! 1. mark the job `processing`
//! 2. call the translator with `(cobol_code, user_story)` and time it
//! 3. mark it `completed` (recording the duration) or `failed`
//!
//! A failed translation only fails its own job. After every mutation the
//! statistics are recomputed and the `(jobs, stats)` pair is published as
//! one [`BatchSnapshot`], so observers never see stats lagging the jobs.
//!
//! With `max_parallel = 1` (the default) at most one translation is in
//! flight. Larger values dispatch up to that many jobs at once, still in
//! queue order and with the same per-job transitions.

use crate::config::BatchConfig;
use crate::error::BatchError;
use crate::job::{duration_ms, BatchJob, JobId, JobStatus, SourceFile};
use crate::stats::{aggregate, BatchStats, ProcessingHistory};
use cobridge_translate::{SharedTranslator, TranslateError, Translation};
use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::{error, info, instrument};

/// Consistent view of the jobs and their statistics
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchSnapshot {
    /// Jobs in upload order
    pub jobs: Vec<BatchJob>,
    /// Statistics computed from exactly these jobs
    pub stats: BatchStats,
}

/// Outcome of one queue run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Jobs taken from `pending` during this run
    pub processed: usize,
    /// Of those, completed
    pub completed: usize,
    /// Of those, failed
    pub failed: usize,
}

/// Sequential (or bounded-parallel) batch pipeline
#[derive(Debug)]
pub struct BatchPipeline {
    translator: SharedTranslator,
    history: Arc<ProcessingHistory>,
    config: BatchConfig,
    jobs: Vec<BatchJob>,
    snapshots: watch::Sender<BatchSnapshot>,
}

type Dispatched = (usize, Result<Translation, TranslateError>, Duration);

impl BatchPipeline {
    /// Create a pipeline
    ///
    /// # Errors
    /// - `BatchError::InvalidConfig` if the configuration does not validate
    pub fn new(
        translator: SharedTranslator,
        history: Arc<ProcessingHistory>,
        config: BatchConfig,
    ) -> Result<Self, BatchError> {
        config.validate()?;
        let (snapshots, _) = watch::channel(BatchSnapshot::default());
        Ok(Self {
            translator,
            history,
            config,
            jobs: Vec::new(),
            snapshots,
        })
    }

    /// Observe every published `(jobs, stats)` pair
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<BatchSnapshot> {
        self.snapshots.subscribe()
    }

    /// Current jobs, in upload order
    #[inline]
    #[must_use]
    pub fn jobs(&self) -> &[BatchJob] {
        &self.jobs
    }

    /// Look up a job
    ///
    /// # Errors
    /// - `BatchError::JobNotFound` for unknown ids
    pub fn job(&self, id: JobId) -> Result<&BatchJob, BatchError> {
        self.jobs
            .iter()
            .find(|j| j.id() == id)
            .ok_or(BatchError::JobNotFound(id))
    }

    /// Statistics for the current jobs
    #[must_use]
    pub fn stats(&self) -> BatchStats {
        aggregate(&self.jobs, &self.history)
    }

    /// Session history shared with this pipeline
    #[inline]
    #[must_use]
    pub fn history(&self) -> &Arc<ProcessingHistory> {
        &self.history
    }

    /// Append one pending job per file, preserving order
    pub fn enqueue(&mut self, files: impl IntoIterator<Item = SourceFile>) -> Vec<JobId> {
        let start = self.jobs.len();
        for file in files {
            let job = BatchJob::pending(file, self.config.default_user_story.clone());
            info!(job_id = %job.id(), file = job.file_name(), "job enqueued");
            self.jobs.push(job);
        }
        self.publish();
        self.jobs[start..].iter().map(BatchJob::id).collect()
    }

    /// Process every job that is pending when the run starts
    ///
    /// Jobs in any other status are left untouched, so running the queue
    /// again without new uploads changes nothing.
    ///
    /// # Errors
    /// - `BatchError::IllegalTransition` if a job was moved out of its
    ///   lifecycle; translation failures are recorded on the job instead.
    ///   Jobs already in flight are still settled before the error returns.
    #[instrument(skip_all, fields(max_parallel = self.config.max_parallel))]
    pub async fn run_queue(&mut self) -> Result<RunSummary, BatchError> {
        let pending: VecDeque<usize> = self
            .jobs
            .iter()
            .enumerate()
            .filter(|(_, job)| job.status() == JobStatus::Pending)
            .map(|(index, _)| index)
            .collect();

        info!(pending = pending.len(), "queue run started");
        self.run_indices(pending).await
    }

    async fn run_indices(&mut self, mut pending: VecDeque<usize>) -> Result<RunSummary, BatchError> {
        let limit = self.config.max_parallel.max(1);
        let mut in_flight = FuturesUnordered::new();
        let mut summary = RunSummary::default();
        let mut first_error: Option<BatchError> = None;

        loop {
            while first_error.is_none() && in_flight.len() < limit {
                let Some(index) = pending.pop_front() else {
                    break;
                };
                match self.dispatch(index) {
                    Ok(future) => in_flight.push(future),
                    Err(e) => first_error = Some(e),
                }
            }

            // After an error nothing new is dispatched, but translations
            // already started are still settled so none stays processing.
            let Some((index, result, elapsed)) = in_flight.next().await else {
                break;
            };
            summary.processed += 1;
            match self.settle(index, result, elapsed) {
                Ok(true) => summary.completed += 1,
                Ok(false) => summary.failed += 1,
                Err(e) if first_error.is_none() => first_error = Some(e),
                Err(e) => error!(error = %e, "job could not be settled"),
            }
        }

        if let Some(e) = first_error {
            error!(error = %e, processed = summary.processed, "queue run aborted");
            return Err(e);
        }

        info!(
            processed = summary.processed,
            completed = summary.completed,
            failed = summary.failed,
            "queue run finished"
        );
        Ok(summary)
    }

    fn dispatch(
        &mut self,
        index: usize,
    ) -> Result<impl std::future::Future<Output = Dispatched> + Send + 'static, BatchError> {
        let job = &mut self.jobs[index];
        job.start()?;
        info!(job_id = %job.id(), file = job.file_name(), "job processing");

        let translator = Arc::clone(&self.translator);
        let source = job.cobol_code().to_string();
        let context = job.user_story().unwrap_or_default().to_string();
        self.publish();

        Ok(async move {
            let started = Instant::now();
            let result = translator.translate(&source, &context).await;
            (index, result, started.elapsed())
        })
    }

    fn settle(
        &mut self,
        index: usize,
        result: Result<Translation, TranslateError>,
        elapsed: Duration,
    ) -> Result<bool, BatchError> {
        let job = &mut self.jobs[index];
        let completed = match result {
            Ok(translation) => {
                job.complete(translation.translated_code, elapsed)?;
                self.history.record(elapsed);
                metrics::counter!("cobridge_batch_jobs_total", "status" => "completed").increment(1);
                metrics::histogram!("cobridge_batch_processing_ms").record(duration_ms(elapsed) as f64);
                info!(job_id = %job.id(), elapsed_ms = duration_ms(elapsed), "job completed");
                true
            }
            Err(e) => {
                let rate_limited = e.is_rate_limited();
                job.fail(e.to_string())?;
                metrics::counter!("cobridge_batch_jobs_total", "status" => "failed").increment(1);
                error!(job_id = %job.id(), error = %e, rate_limited, "job failed");
                false
            }
        };
        self.publish();
        Ok(completed)
    }

    fn publish(&self) {
        let snapshot = BatchSnapshot {
            jobs: self.jobs.clone(),
            stats: self.stats(),
        };
        self.snapshots.send_replace(snapshot);
    }
}
