//! Run command implementation.

use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the run command.
pub async fn execute_run(
    args: RunArgs,
    config: &Config,
    api_key: Option<&str>,
    formatter: &Formatter,
) -> Result<()> {
    let input = args.input.unwrap_or_else(|| config.paths.input_dir.clone());
    let output = args.output.unwrap_or_else(|| config.paths.output_dir.clone());

    let pipeline = super::build_pipeline(config, api_key, output)?;
    let report = pipeline.run(&input).await?;

    println!("{}", formatter.format_report(&report)?);

    Ok(())
}
