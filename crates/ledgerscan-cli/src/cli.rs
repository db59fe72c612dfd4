//! CLI command definitions and argument parsing.

use clap::builder::FalseyValueParser;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Ledgerscan - Extract bank statement data through a hosted assistant.
#[derive(Debug, Parser)]
#[command(name = "ledgerscan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// API key for the assistant service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Assistant that processes the statements
    #[arg(long, env = "LEDGERSCAN_ASSISTANT_ID", global = true)]
    pub assistant_id: Option<String>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose logging, including raw upload responses
    #[arg(long, env = "DEBUG", global = true, value_parser = FalseyValueParser::new())]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (output paths only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Process every statement under the input directory (default)
    Run(RunArgs),

    /// Process a single statement file
    Process(ProcessArgs),

    /// Inspect or create the configuration file
    Config(ConfigArgs),
}

/// Arguments for the run command.
#[derive(Debug, Default, Parser)]
pub struct RunArgs {
    /// Directory to scan recursively for statements
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory the assistant answers are written to
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the process command.
#[derive(Debug, Parser)]
pub struct ProcessArgs {
    /// Statement file to process
    pub file: PathBuf,

    /// Directory the assistant answer is written to
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
