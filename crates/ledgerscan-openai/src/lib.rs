//! Ledgerscan Assistants API Layer
//!
//! Implementations of the `AssistantApi` trait from `ledgerscan-domain`.
//!
//! # Architecture
//!
//! Each trait method maps to a single HTTP request against the hosted
//! Assistants (v2) API. Responses are decoded into explicit per-endpoint
//! schemas, so a malformed body surfaces as a typed [`ApiError`] instead of a
//! panic further down the line.
//!
//! # Providers
//!
//! - `OpenAiClient`: reqwest-based client for the hosted service
//! - `MockAssistantApi`: Scripted in-memory double for testing
//!
//! # Examples
//!
//! ```
//! use ledgerscan_openai::MockAssistantApi;
//! use ledgerscan_domain::{AssistantApi, RunStatus};
//!
//! # async fn example() -> Result<(), ledgerscan_openai::ApiError> {
//! let mut api = MockAssistantApi::new("{\"rows\":[]}");
//! api.push_statuses([RunStatus::InProgress, RunStatus::Completed]);
//!
//! let thread = api.create_thread().await?;
//! assert_eq!(thread.as_str(), "thread_1");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod client;
pub mod mock;
mod schema;

use std::path::PathBuf;
use thiserror::Error;

pub use client::{OpenAiClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use mock::{MockAssistantApi, MockCall, Step};

/// Errors that can occur while talking to the assistant service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Local file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Network or transport failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("{endpoint} failed [{status}]: {body}")]
    Status {
        /// Operation that failed
        endpoint: &'static str,
        /// HTTP status code
        status: u16,
        /// Decoded error body
        body: String,
    },

    /// Response body was not JSON
    #[error("Error decoding {endpoint} response: {message}")]
    Decode {
        /// Operation whose response failed to decode
        endpoint: &'static str,
        /// Parser message
        message: String,
    },

    /// Response was JSON but missing a field or had the wrong type
    #[error("{endpoint} response has an unexpected shape ({message}): {body}")]
    Schema {
        /// Operation whose response was malformed
        endpoint: &'static str,
        /// Decoder message
        message: String,
        /// Raw response body
        body: String,
    },

    /// Client misconfiguration (empty key, bad base URL)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status attached to the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the service rejected our credentials
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ApiError::Status {
            endpoint: "upload",
            status: 401,
            body: "{\"error\":\"bad key\"}".to_string(),
        };
        assert_eq!(err.to_string(), "upload failed [401]: {\"error\":\"bad key\"}");
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_non_status_errors_are_not_unauthorized() {
        let err = ApiError::Config("missing key".to_string());
        assert_eq!(err.status(), None);
        assert!(!err.is_unauthorized());
    }
}
