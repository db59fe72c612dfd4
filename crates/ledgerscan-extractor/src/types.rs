//! Result types for extraction

use ledgerscan_domain::{RunId, ThreadId};
use std::path::PathBuf;

/// Result of processing one uploaded file
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    /// Thread created for this file
    pub thread_id: ThreadId,

    /// Run created for this file
    pub run_id: RunId,

    /// Verbatim text of the assistant's newest message
    pub text: String,

    /// Where the text was saved; `None` if the write failed
    pub saved_to: Option<PathBuf>,

    /// Status checks performed before the run completed
    pub poll_attempts: u32,
}
