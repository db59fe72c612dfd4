//! Trait definitions for external interactions
//!
//! These traits define the boundary between the extraction workflow and the
//! remote assistant service. Implementations live in other crates.

use crate::{FileId, RunId, RunSnapshot, ThreadId, ThreadMessage};
use async_trait::async_trait;
use std::path::Path;

/// Operations the extraction workflow needs from a hosted assistant service
///
/// Implemented by the infrastructure layer (ledgerscan-openai). Every call
/// maps to exactly one remote request; implementations must not retry.
#[async_trait]
pub trait AssistantApi: Send + Sync {
    /// Error type for service operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Upload a local file for assistant use
    async fn upload_file(&self, path: &Path) -> Result<FileId, Self::Error>;

    /// Create an empty conversation thread
    async fn create_thread(&self) -> Result<ThreadId, Self::Error>;

    /// Post a user message into a thread
    async fn post_message(&self, thread: &ThreadId, content: &str) -> Result<(), Self::Error>;

    /// Start a run of `assistant_id` with `file` attached as a code-execution resource
    async fn create_run(
        &self,
        thread: &ThreadId,
        assistant_id: &str,
        file: &FileId,
    ) -> Result<RunId, Self::Error>;

    /// Fetch the current status of a run
    async fn run_status(&self, thread: &ThreadId, run: &RunId)
        -> Result<RunSnapshot, Self::Error>;

    /// List the messages in a thread, newest first
    async fn list_messages(&self, thread: &ThreadId) -> Result<Vec<ThreadMessage>, Self::Error>;
}
