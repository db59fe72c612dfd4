//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use ledgerscan_extractor::ExtractorConfig;
use ledgerscan_openai::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Assistant used when none is configured.
pub const DEFAULT_ASSISTANT_ID: &str = "asst_Ht8x8n4tcGzx5p6HPb29FUvC";

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Assistant service settings
    #[serde(default)]
    pub api: ApiSettings,

    /// Input and output locations
    #[serde(default)]
    pub paths: PathSettings,

    /// Polling and prompt settings
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Assistant service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the Assistants API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Assistant that processes the statements
    #[serde(default = "default_assistant_id")]
    pub assistant_id: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Input and output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Directory scanned for statements
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    /// Directory the assistant answers are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".ledgerscan").join("config.toml"))
    }

    /// Load configuration from `path`, or defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Apply the command-line assistant override, if any.
    pub fn with_assistant_id(mut self, assistant_id: Option<String>) -> Self {
        if let Some(id) = assistant_id {
            self.api.assistant_id = id;
        }
        self
    }

    /// Check settings that cannot be validated field by field.
    pub fn validate(&self) -> Result<()> {
        if self.api.assistant_id.trim().is_empty() {
            return Err(CliError::Config("assistant_id must not be empty".into()));
        }
        if self.api.request_timeout_secs == 0 {
            return Err(CliError::Config("request_timeout_secs must be greater than 0".into()));
        }
        self.extractor.validate().map_err(CliError::Config)
    }
}

impl ApiSettings {
    /// Per-request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Require a non-empty API key.
pub fn require_api_key(api_key: Option<&str>) -> Result<&str> {
    match api_key.map(str::trim) {
        Some(key) if !key.is_empty() => Ok(key),
        _ => Err(CliError::Config(
            "API key not set. Use --api-key or set OPENAI_API_KEY (a .env file works too)".into(),
        )),
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            assistant_id: default_assistant_id(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_assistant_id() -> String {
    DEFAULT_ASSISTANT_ID.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("statements")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("bank_output")
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
