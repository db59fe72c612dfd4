//! Ledgerscan Domain Layer
//!
//! Core value types shared by every other crate in the workspace, plus the
//! trait that separates the extraction workflow from the remote assistant
//! service.
//!
//! ## Key Concepts
//!
//! - **SourceFile**: A statement file discovered on disk, tagged with its kind
//! - **FileId / ThreadId / RunId**: Opaque identifiers handed out by the remote service
//! - **RunStatus**: The lifecycle of a remote run (queued → in progress → terminal)
//! - **ThreadMessage**: A message read back from a conversation thread
//!
//! ## Architecture
//!
//! - No HTTP, no filesystem writes
//! - Infrastructure implementations (`ledgerscan-openai`) implement [`traits::AssistantApi`]
//! - The orchestration logic (`ledgerscan-extractor`) is generic over that trait

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ids;
pub mod message;
pub mod run;
pub mod source;
pub mod traits;

// Re-exports for convenience
pub use ids::{FileId, RunId, ThreadId};
pub use message::{MessageContent, ThreadMessage};
pub use run::{RunSnapshot, RunStatus};
pub use source::{FileKind, SourceFile};
pub use traits::AssistantApi;
