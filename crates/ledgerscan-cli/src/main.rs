//! Ledgerscan CLI - Batch extraction of bank statements through a hosted assistant.

use clap::Parser;
use ledgerscan_cli::cli::RunArgs;
use ledgerscan_cli::commands;
use ledgerscan_cli::{logging, Cli, Command, Config, Formatter};

#[tokio::main]
async fn main() {
    // .env must be loaded before clap reads env-backed flags
    dotenvy::dotenv().ok();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> ledgerscan_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    logging::init(cli.debug);

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };
    let config = Config::load_from(&config_path)?.with_assistant_id(cli.assistant_id.clone());

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    let api_key = cli.api_key.as_deref();
    match cli.command {
        None => {
            commands::execute_run(RunArgs::default(), &config, api_key, &formatter).await?;
        }
        Some(Command::Run(args)) => {
            commands::execute_run(args, &config, api_key, &formatter).await?;
        }
        Some(Command::Process(args)) => {
            commands::execute_process(args, &config, api_key, &formatter).await?;
        }
        Some(Command::Config(args)) => {
            commands::execute_config(args, &config, &config_path, &formatter)?;
        }
    }

    Ok(())
}
