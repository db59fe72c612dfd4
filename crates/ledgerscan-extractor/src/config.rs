//! Configuration for the Extractor

use crate::prompt::{DEFAULT_INSTRUCTIONS, FILE_TYPE_PLACEHOLDER};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Delay before the first status check, and between checks (milliseconds)
    pub poll_interval_ms: u64,

    /// Maximum number of status checks per run
    pub max_poll_attempts: u32,

    /// Multiplier applied to the delay after each check (1.0 = fixed interval)
    pub poll_backoff_factor: f64,

    /// Upper bound on a single delay when backing off (milliseconds)
    pub max_poll_interval_ms: u64,

    /// Instruction template sent as the user message
    pub instructions: String,
}

impl ExtractorConfig {
    /// Base polling interval as a Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Cap on a single polling delay as a Duration
    pub fn max_poll_interval(&self) -> Duration {
        Duration::from_millis(self.max_poll_interval_ms)
    }

    /// Overall polling ceiling: base interval × attempts
    pub fn poll_timeout(&self) -> Duration {
        self.poll_interval() * self.max_poll_attempts
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.poll_interval_ms == 0 {
            return Err("poll_interval_ms must be greater than 0".to_string());
        }
        if self.max_poll_attempts == 0 {
            return Err("max_poll_attempts must be greater than 0".to_string());
        }
        if !self.poll_backoff_factor.is_finite() || self.poll_backoff_factor < 1.0 {
            return Err("poll_backoff_factor must be a finite number of at least 1.0".to_string());
        }
        if self.max_poll_interval_ms < self.poll_interval_ms {
            return Err("max_poll_interval_ms cannot be below poll_interval_ms".to_string());
        }
        if !self.instructions.contains(FILE_TYPE_PLACEHOLDER) {
            return Err(format!(
                "instructions must contain the {} placeholder",
                FILE_TYPE_PLACEHOLDER
            ));
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// 2 s fixed interval, 30 checks (about one minute per run)
    fn default() -> Self {
        Self {
            poll_interval_ms: 2_000,
            max_poll_attempts: 30,
            poll_backoff_factor: 1.0,
            max_poll_interval_ms: 10_000,
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
        }
    }
}

impl ExtractorConfig {
    /// Backoff preset: starts at 2 s and grows by half each check, capped at
    /// 8 s, within the same one-minute ceiling as the default
    pub fn backoff() -> Self {
        Self {
            poll_backoff_factor: 1.5,
            max_poll_interval_ms: 8_000,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
