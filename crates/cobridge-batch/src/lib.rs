//! cobridge Batch
//!
//! Queue of COBOL files translated one after another (or with bounded
//! parallelism), with per-job status tracking and live statistics.
//!
//! # Example
//!
//! ```rust,ignore
//! use cobridge_batch::{BatchConfig, BatchPipeline, ProcessingHistory, SourceFile};
//! use std::sync::Arc;
//!
//! # async fn example(translator: cobridge_translate::SharedTranslator) -> Result<(), cobridge_batch::BatchError> {
//! let mut pipeline = BatchPipeline::new(translator, Arc::new(ProcessingHistory::new()), BatchConfig::new())?;
//! pipeline.enqueue([SourceFile::new("PAYROLL.cob", "       01  WS-PAY PIC 9(5).")]);
//!
//! let summary = pipeline.run_queue().await?;
//! println!("{} completed, {} failed", summary.completed, summary.failed);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod export;
pub mod job;
pub mod pipeline;
pub mod stats;

pub use config::BatchConfig;
pub use error::BatchError;
pub use export::{
    completed_exports, export_completed, java_file_name, write_batch_results, write_java_file,
    ExportedJob,
};
pub use job::{allowed_transitions, BatchJob, JobId, JobStatus, SourceFile, DEFAULT_USER_STORY};
pub use pipeline::{BatchPipeline, BatchSnapshot, RunSummary};
pub use stats::{aggregate, BatchStats, ProcessingHistory};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving a batch
    pub use crate::{
        BatchConfig, BatchJob, BatchPipeline, BatchSnapshot, BatchStats, JobStatus,
        ProcessingHistory, SourceFile,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
