use cobridge_batch::{
    BatchConfig, BatchJob, BatchPipeline, BatchSnapshot, JobStatus, ProcessingHistory, SourceFile,
};
use cobridge_test_utils::{cobol_files, MockTranslator};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

fn files(count: usize) -> Vec<SourceFile> {
    cobol_files(count)
        .into_iter()
        .map(|(name, contents)| SourceFile::new(name, contents))
        .collect()
}

fn statuses(jobs: &[BatchJob]) -> Vec<JobStatus> {
    jobs.iter().map(BatchJob::status).collect()
}

fn counts_match(snapshot: &BatchSnapshot) -> bool {
    let count = |s: JobStatus| snapshot.jobs.iter().filter(|j| j.status() == s).count();
    snapshot.stats.total == snapshot.jobs.len()
        && snapshot.stats.completed == count(JobStatus::Completed)
        && snapshot.stats.failed == count(JobStatus::Failed)
        && snapshot.stats.in_progress == count(JobStatus::Processing)
}

#[tokio::test]
async fn one_failure_does_not_stop_the_queue() {
    let translator = MockTranslator::new()
        .with_delay(Duration::from_millis(2))
        .shared();
    translator.fail_when_source_contains("PROG2", "Failed to translate code.");
    let history = Arc::new(ProcessingHistory::new());
    let mut pipeline =
        BatchPipeline::new(translator.clone(), history.clone(), BatchConfig::default()).unwrap();
    pipeline.enqueue(files(3));

    let summary = pipeline.run_queue().await.unwrap();

    assert_eq!(
        statuses(pipeline.jobs()),
        vec![JobStatus::Completed, JobStatus::Failed, JobStatus::Completed]
    );
    assert_eq!(summary.processed, 3);
    assert_eq!(summary.completed, 2);
    assert_eq!(summary.failed, 1);

    let stats = pipeline.stats();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.completed, 2);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.in_progress, 0);
    assert_eq!(history.len(), 2);

    let jobs = pipeline.jobs();
    let first = jobs[0].processing_time_ms().unwrap();
    let third = jobs[2].processing_time_ms().unwrap();
    assert_eq!(jobs[1].processing_time_ms(), None);
    assert_eq!(stats.average_processing_time, (first + third) as f64 / 2.0);

    assert_eq!(pipeline.jobs()[0].java_code(), Some("class Translated {}"));
    assert_eq!(pipeline.jobs()[1].error(), Some("Failed to translate code."));
    assert!(pipeline.jobs()[1].java_code().is_none());
    assert_eq!(translator.call_count(), 3);
}

#[tokio::test]
async fn rerunning_without_new_jobs_changes_nothing() {
    let translator = MockTranslator::new().shared();
    let mut pipeline = BatchPipeline::new(
        translator.clone(),
        Arc::new(ProcessingHistory::new()),
        BatchConfig::default(),
    )
    .unwrap();
    pipeline.enqueue(files(2));
    pipeline.run_queue().await.unwrap();
    let before = pipeline.jobs().to_vec();
    let stats_before = pipeline.stats();
    let history_before = pipeline.history().len();

    let summary = pipeline.run_queue().await.unwrap();

    assert_eq!(summary.processed, 0);
    assert_eq!(pipeline.jobs(), before.as_slice());
    assert_eq!(pipeline.stats(), stats_before);
    assert_eq!(pipeline.history().len(), history_before);
    assert_eq!(translator.call_count(), 2);
}

#[tokio::test]
async fn later_uploads_run_on_next_queue_run() {
    let translator = MockTranslator::new().shared();
    let mut pipeline = BatchPipeline::new(
        translator.clone(),
        Arc::new(ProcessingHistory::new()),
        BatchConfig::default(),
    )
    .unwrap();
    pipeline.enqueue(files(1));
    pipeline.run_queue().await.unwrap();

    pipeline.enqueue([SourceFile::new("LATE.cob", "       01  WS-LATE PIC X.")]);
    assert_eq!(
        statuses(pipeline.jobs()),
        vec![JobStatus::Completed, JobStatus::Pending]
    );

    let summary = pipeline.run_queue().await.unwrap();
    assert_eq!(summary.processed, 1);
    assert_eq!(translator.calls()[1].source, "       01  WS-LATE PIC X.");
}

#[tokio::test]
async fn average_spans_the_whole_session() {
    let history = Arc::new(ProcessingHistory::new());
    let translator = MockTranslator::new()
        .with_delay(Duration::from_millis(5))
        .shared();

    let mut first =
        BatchPipeline::new(translator.clone(), history.clone(), BatchConfig::default()).unwrap();
    first.enqueue(files(2));
    first.run_queue().await.unwrap();

    let second = BatchPipeline::new(translator, history.clone(), BatchConfig::default()).unwrap();
    let stats = second.stats();

    assert_eq!(stats.total, 0);
    assert_eq!(history.len(), 2);
    assert!(stats.average_processing_time >= 5.0);
}

#[tokio::test]
async fn sequential_by_default() {
    let translator = MockTranslator::new()
        .with_delay(Duration::from_millis(10))
        .shared();
    let mut pipeline = BatchPipeline::new(
        translator.clone(),
        Arc::new(ProcessingHistory::new()),
        BatchConfig::default(),
    )
    .unwrap();
    pipeline.enqueue(files(4));
    pipeline.run_queue().await.unwrap();

    assert_eq!(translator.peak_in_flight(), 1);
}

#[tokio::test]
async fn parallelism_is_bounded() {
    let translator = MockTranslator::new()
        .with_delay(Duration::from_millis(20))
        .shared();
    let mut pipeline = BatchPipeline::new(
        translator.clone(),
        Arc::new(ProcessingHistory::new()),
        BatchConfig::new().with_max_parallel(3),
    )
    .unwrap();
    pipeline.enqueue(files(7));

    let summary = pipeline.run_queue().await.unwrap();

    assert_eq!(summary.completed, 7);
    assert_eq!(translator.peak_in_flight(), 3);
    let names: Vec<_> = pipeline.jobs().iter().map(BatchJob::file_name).collect();
    assert_eq!(
        names,
        vec!["PROG1.cob", "PROG2.cob", "PROG3.cob", "PROG4.cob", "PROG5.cob", "PROG6.cob", "PROG7.cob"]
    );
    let dispatched: Vec<_> = translator.calls().iter().map(|c| c.source.clone()).collect();
    assert!(dispatched[0].contains("PROG1"));
    assert!(dispatched[6].contains("PROG7"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn observers_never_see_stale_stats() {
    let translator = MockTranslator::new()
        .with_delay(Duration::from_millis(15))
        .shared();
    translator.fail_when_source_contains("PROG3", "boom");
    let mut pipeline = BatchPipeline::new(
        translator,
        Arc::new(ProcessingHistory::new()),
        BatchConfig::default(),
    )
    .unwrap();
    let mut rx = pipeline.subscribe();

    let observer = tokio::spawn(async move {
        let mut seen = Vec::new();
        while rx.changed().await.is_ok() {
            seen.push(rx.borrow_and_update().clone());
        }
        seen
    });

    pipeline.enqueue(files(4));
    pipeline.run_queue().await.unwrap();
    drop(pipeline);

    let seen = observer.await.unwrap();
    assert!(!seen.is_empty());
    assert!(seen.iter().all(counts_match));
    assert!(seen.iter().all(|s| s.stats.in_progress <= 1));

    let last = seen.last().unwrap();
    assert_eq!(last.stats.completed, 3);
    assert_eq!(last.stats.failed, 1);
    assert_eq!(last.stats.in_progress, 0);
}
