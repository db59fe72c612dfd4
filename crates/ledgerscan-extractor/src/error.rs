//! Error types for the Extractor

use ledgerscan_domain::RunStatus;
use std::time::Duration;
use thiserror::Error;

/// Errors that abort processing of a single file
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Transport or protocol failure reported by the assistant service
    #[error(transparent)]
    Api(Box<dyn std::error::Error + Send + Sync>),

    /// Run reached `failed`, `cancelled` or `expired`
    #[error("Run failed with status: {status} ({payload})")]
    RunFailed {
        /// Terminal status
        status: RunStatus,
        /// Full status payload from the service
        payload: String,
    },

    /// Poll bound exhausted without a terminal status
    #[error("Timed out waiting for run to complete after {attempts} status checks ({elapsed:?})")]
    Timeout {
        /// Status checks performed
        attempts: u32,
        /// Wall-clock time spent polling
        elapsed: Duration,
    },

    /// Thread had no messages after the run completed
    #[error("Message list is empty")]
    EmptyResponse,

    /// Newest message had no text content block
    #[error("Newest message has no text content")]
    MissingText,

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExtractorError {
    /// Wrap an error from an `AssistantApi` implementation
    pub fn api<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ExtractorError::Api(Box::new(error))
    }

    /// Borrow the underlying service error as a concrete type, if it is one
    pub fn api_error<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            ExtractorError::Api(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}
