//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Directory walk failed
    #[error("Error walking input directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// Extraction error outside of per-file processing
    #[error("{0}")]
    Extractor(#[from] ledgerscan_extractor::ExtractorError),

    /// Assistant API client error
    #[error("API error: {0}")]
    Api(#[from] ledgerscan_openai::ApiError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
