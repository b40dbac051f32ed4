use cobridge_batch::{
    export_completed, write_batch_results, write_java_file, BatchConfig, BatchPipeline,
    ExportedJob, ProcessingHistory, SourceFile,
};
use cobridge_test_utils::{MockTranslator, Scripted};
use pretty_assertions::assert_eq;
use std::sync::Arc;

async fn finished_pipeline() -> BatchPipeline {
    let translator = MockTranslator::with_script(vec![
        Scripted::Reply("public class Payroll {}".into()),
        Scripted::Fail("Failed to translate code.".into()),
    ])
    .shared();
    let mut pipeline = BatchPipeline::new(
        translator,
        Arc::new(ProcessingHistory::new()),
        BatchConfig::default(),
    )
    .unwrap();
    pipeline.enqueue([
        SourceFile::new("PAYROLL.cob", "       01  WS-PAY PIC 9(5)."),
        SourceFile::new("BROKEN.cob", "       01  WS-X PIC X."),
    ]);
    pipeline.run_queue().await.unwrap();
    pipeline
}

#[tokio::test]
async fn export_lists_completed_jobs_only() {
    let pipeline = finished_pipeline().await;

    let json = export_completed(pipeline.jobs()).unwrap();
    let exported: Vec<ExportedJob> = serde_json::from_str(&json).unwrap();

    assert_eq!(
        exported,
        vec![ExportedJob {
            file_name: "PAYROLL.cob".into(),
            java_code: "public class Payroll {}".into(),
        }]
    );
    assert!(json.contains("\"fileName\""));
    assert!(json.contains("\"javaCode\""));
}

#[tokio::test]
async fn writes_java_sources_for_completed_jobs() {
    let pipeline = finished_pipeline().await;
    let dir = tempfile::tempdir().unwrap();

    let written = write_java_file(dir.path(), &pipeline.jobs()[0]).await.unwrap();
    let skipped = write_java_file(dir.path(), &pipeline.jobs()[1]).await.unwrap();

    let path = written.unwrap();
    assert_eq!(path, dir.path().join("PAYROLL.java"));
    assert_eq!(
        tokio::fs::read_to_string(&path).await.unwrap(),
        "public class Payroll {}"
    );
    assert!(skipped.is_none());
    assert!(!dir.path().join("BROKEN.java").exists());
}

#[tokio::test]
async fn writes_batch_results_file() {
    let pipeline = finished_pipeline().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("batch-results.json");

    let count = write_batch_results(&path, pipeline.jobs()).await.unwrap();

    assert_eq!(count, 1);
    let contents = tokio::fs::read_to_string(&path).await.unwrap();
    assert_eq!(contents, export_completed(pipeline.jobs()).unwrap());
}

#[tokio::test]
async fn missing_directory_is_an_io_error() {
    let pipeline = finished_pipeline().await;
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");

    let err = write_java_file(&missing, &pipeline.jobs()[0]).await.unwrap_err();
    assert!(matches!(err, cobridge_batch::BatchError::Io { .. }));
}

#[tokio::test]
async fn source_files_are_read_by_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CUSTOMER.cob");
    tokio::fs::write(&path, "       01  CUSTOMER-ID PIC 9(6).").await.unwrap();

    let file = SourceFile::read(&path).await.unwrap();
    assert_eq!(file.name, "CUSTOMER.cob");
    assert_eq!(file.contents, "       01  CUSTOMER-ID PIC 9(6).");
}
