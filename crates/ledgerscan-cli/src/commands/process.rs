//! Process command implementation.

use crate::cli::ProcessArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;

/// Execute the process command.
pub async fn execute_process(
    args: ProcessArgs,
    config: &Config,
    api_key: Option<&str>,
    formatter: &Formatter,
) -> Result<()> {
    if !args.file.is_file() {
        return Err(CliError::InvalidInput(format!(
            "{} is not a file",
            args.file.display()
        )));
    }

    let output = args.output.unwrap_or_else(|| config.paths.output_dir.clone());
    let pipeline = super::build_pipeline(config, api_key, output)?;

    let report = pipeline.process_one(&args.file).await;
    println!("{}", formatter.format_file(&report)?);

    Ok(())
}
