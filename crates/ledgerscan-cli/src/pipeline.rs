//! Batch pipeline: walks a statement directory and runs every file through
//! the extractor, one file at a time.
//!
//! A failing file is recorded and the batch moves on. Only a failure to walk
//! the directory itself aborts the batch.

use crate::error::Result;
use ledgerscan_domain::{AssistantApi, SourceFile};
use ledgerscan_extractor::Extractor;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};
use walkdir::WalkDir;

/// Stage at which a file failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Uploading the file bytes
    Upload,
    /// Thread, run, polling or answer retrieval
    Process,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Upload => write!(f, "upload"),
            Stage::Process => write!(f, "process"),
        }
    }
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileOutcome {
    /// The assistant answered; `output` is `None` if saving it failed
    Processed {
        /// Where the answer was written
        output: Option<PathBuf>,
        /// Status checks before the run completed
        poll_attempts: u32,
    },
    /// Unsupported file type; nothing was sent
    Skipped {
        /// Why the file was skipped
        reason: String,
    },
    /// Processing stopped with an error
    Failed {
        /// Where it stopped
        stage: Stage,
        /// Error message
        error: String,
    },
}

/// Per-file entry of a batch report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    /// Input file
    pub path: PathBuf,
    /// File-type label
    pub kind: &'static str,
    /// Result
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

/// Results of a batch run, in processing order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Per-file entries
    pub files: Vec<FileReport>,
}

impl BatchReport {
    /// Add an entry.
    pub fn push(&mut self, report: FileReport) {
        self.files.push(report);
    }

    /// Number of files the assistant answered.
    pub fn processed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Processed { .. }))
    }

    /// Number of skipped files.
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped { .. }))
    }

    /// Number of failed files.
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }
}

/// Drives files through an [`Extractor`].
pub struct Pipeline<A>
where
    A: AssistantApi,
{
    extractor: Extractor<A>,
}

impl<A> Pipeline<A>
where
    A: AssistantApi,
{
    /// Create a pipeline around an extractor.
    pub fn new(extractor: Extractor<A>) -> Self {
        Self { extractor }
    }

    /// The underlying extractor.
    pub fn extractor(&self) -> &Extractor<A> {
        &self.extractor
    }

    /// Process every file under `root`, recursively, in file-name order.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Walk` if the directory cannot be read (including a
    /// missing root) and `CliError::Io` if the output directory cannot be
    /// created. Per-file failures are recorded in the report instead.
    pub async fn run(&self, root: &Path) -> Result<BatchReport> {
        self.extractor.writer().ensure_dir()?;
        info!("Scanning {}", root.display());

        let mut report = BatchReport::default();
        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_dir() {
                continue;
            }
            report.push(self.process_one(entry.path()).await);
        }

        info!(
            "Batch finished: {} processed, {} skipped, {} failed",
            report.processed(),
            report.skipped(),
            report.failed()
        );
        Ok(report)
    }

    /// Process a single file.
    pub async fn process_one(&self, path: &Path) -> FileReport {
        let source = SourceFile::new(path);
        let kind = source.kind.label();
        let outcome = self.process_source(&source).await;

        FileReport {
            path: source.path,
            kind,
            outcome,
        }
    }

    async fn process_source(&self, source: &SourceFile) -> FileOutcome {
        if !source.kind.is_supported() {
            info!("Skipping {} file: {}", source.kind.label(), source.path.display());
            return FileOutcome::Skipped {
                reason: format!("{} files are not supported", source.kind.label()),
            };
        }

        info!("Processing {}", source.path.display());

        let file_id = match self.extractor.upload(source).await {
            Ok(id) => id,
            Err(e) => {
                error!("Error uploading file {}: {}", source.path.display(), e);
                return FileOutcome::Failed {
                    stage: Stage::Upload,
                    error: e.to_string(),
                };
            }
        };

        match self.extractor.process(&file_id, source).await {
            Ok(outcome) => {
                debug!("Assistant response for {}: {}", source.file_name(), outcome.text);
                FileOutcome::Processed {
                    output: outcome.saved_to,
                    poll_attempts: outcome.poll_attempts,
                }
            }
            Err(e) => {
                error!("Error processing file {}: {}", source.path.display(), e);
                FileOutcome::Failed {
                    stage: Stage::Process,
                    error: e.to_string(),
                }
            }
        }
    }
}
