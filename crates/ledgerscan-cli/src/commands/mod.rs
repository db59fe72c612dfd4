//! Command implementations.

pub mod config;
pub mod process;
pub mod run;

pub use self::config::execute_config;
pub use self::process::execute_process;
pub use self::run::execute_run;

use crate::config::{require_api_key, Config};
use crate::error::Result;
use crate::pipeline::Pipeline;
use ledgerscan_extractor::{Extractor, ResultWriter};
use ledgerscan_openai::OpenAiClient;
use std::path::PathBuf;

/// Build a pipeline backed by the Assistants API.
pub(crate) fn build_pipeline(
    config: &Config,
    api_key: Option<&str>,
    output_dir: PathBuf,
) -> Result<Pipeline<OpenAiClient>> {
    let api_key = require_api_key(api_key)?;
    config.validate()?;

    let client = OpenAiClient::with_options(
        api_key,
        config.api.base_url.as_str(),
        config.api.request_timeout(),
    )?;
    let extractor = Extractor::new(
        client,
        config.api.assistant_id.as_str(),
        ResultWriter::new(output_dir),
        config.extractor.clone(),
    )?;

    Ok(Pipeline::new(extractor))
}
