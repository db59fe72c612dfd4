//! Ledgerscan CLI library.
//!
//! This library provides the core functionality for the `ledgerscan` command-line
//! interface: configuration management, the batch pipeline that walks a
//! statement directory, command execution, and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod pipeline;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use pipeline::{BatchReport, FileOutcome, FileReport, Pipeline, Stage};
