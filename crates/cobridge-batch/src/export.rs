//! Export of completed translations
//!
//! Only `completed` jobs with Java code are exported. Java files are named
//! after the upload's final path component with its last extension, whatever
//! it is, replaced by `.java`.

use crate::error::BatchError;
use crate::job::{BatchJob, JobStatus};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One exported translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedJob {
    /// Original COBOL file name
    pub file_name: String,
    /// Translated source
    pub java_code: String,
}

/// Java file name for an uploaded COBOL file
///
/// ```
/// use cobridge_batch::java_file_name;
/// assert_eq!(java_file_name("PAYROLL.cob"), "PAYROLL.java");
/// assert_eq!(java_file_name("legacy/INV.CBL"), "INV.java");
/// assert_eq!(java_file_name("two.dots.cbl"), "two.dots.java");
/// assert_eq!(java_file_name("README"), "README.java");
/// ```
#[must_use]
pub fn java_file_name(file_name: &str) -> String {
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .map_or_else(|| file_name.to_string(), |s| s.to_string_lossy().into_owned());
    format!("{stem}.java")
}

fn exportable(job: &BatchJob) -> Option<ExportedJob> {
    if job.status() != JobStatus::Completed {
        return None;
    }
    job.java_code().map(|code| ExportedJob {
        file_name: job.file_name().to_string(),
        java_code: code.to_string(),
    })
}

/// Completed translations in job order
#[must_use]
pub fn completed_exports(jobs: &[BatchJob]) -> Vec<ExportedJob> {
    jobs.iter().filter_map(exportable).collect()
}

/// Pretty JSON array of `{fileName, javaCode}` for every completed job
///
/// # Errors
/// - `BatchError::Serialization` if encoding fails
pub fn export_completed(jobs: &[BatchJob]) -> Result<String, BatchError> {
    Ok(serde_json::to_string_pretty(&completed_exports(jobs))?)
}

/// Write one job's Java source into `dir`
///
/// Returns the written path, or `None` if the job has nothing to export.
///
/// # Errors
/// - `BatchError::Io` if the file cannot be written
pub async fn write_java_file(
    dir: impl AsRef<Path>,
    job: &BatchJob,
) -> Result<Option<PathBuf>, BatchError> {
    let Some(export) = exportable(job) else {
        debug!(job_id = %job.id(), status = %job.status(), "nothing to export");
        return Ok(None);
    };
    let path = dir.as_ref().join(java_file_name(&export.file_name));
    tokio::fs::write(&path, export.java_code)
        .await
        .map_err(|e| BatchError::io_error(&path, e))?;
    info!(path = %path.display(), "java source written");
    Ok(Some(path))
}

/// Write the export of every completed job to `path`
///
/// # Errors
/// - `BatchError::Serialization` if encoding fails
/// - `BatchError::Io` if the file cannot be written
pub async fn write_batch_results(path: impl AsRef<Path>, jobs: &[BatchJob]) -> Result<usize, BatchError> {
    let path = path.as_ref();
    let exports = completed_exports(jobs);
    let json = serde_json::to_string_pretty(&exports)?;
    tokio::fs::write(path, json)
        .await
        .map_err(|e| BatchError::io_error(path, e))?;
    info!(path = %path.display(), exported = exports.len(), "batch results written");
    Ok(exports.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::SourceFile;
    use std::time::Duration;

    #[test]
    fn java_names() {
        assert_eq!(java_file_name("A.cob"), "A.java");
        assert_eq!(java_file_name("NOEXT"), "NOEXT.java");
        assert_eq!(java_file_name("two.dots.cbl"), "two.dots.java");
    }

    #[test]
    fn any_extension_is_replaced_and_directories_dropped() {
        assert_eq!(java_file_name("notes.txt"), "notes.java");
        assert_eq!(java_file_name("src/legacy/PAYROLL.cob"), "PAYROLL.java");
        assert_eq!(java_file_name("../up/INV"), "INV.java");
    }

    #[test]
    fn only_completed_jobs_export() {
        let mut done = BatchJob::pending(SourceFile::new("A.cob", ""), "s");
        done.start().unwrap();
        done.complete("class A {}".into(), Duration::from_millis(1)).unwrap();
        let mut failed = BatchJob::pending(SourceFile::new("B.cob", ""), "s");
        failed.start().unwrap();
        failed.fail("x".into()).unwrap();
        let pending = BatchJob::pending(SourceFile::new("C.cob", ""), "s");

        let exports = completed_exports(&[done, failed, pending]);
        assert_eq!(
            exports,
            vec![ExportedJob {
                file_name: "A.cob".into(),
                java_code: "class A {}".into(),
            }]
        );
    }

    #[test]
    fn empty_export_is_empty_array() {
        assert_eq!(export_completed(&[]).unwrap(), "[]");
    }
}
