//! Ledgerscan Extractor
//!
//! Drives one statement file through the hosted assistant and returns the
//! assistant's answer.
//!
//! # Overview
//!
//! Each file goes through a fixed sequence of remote calls. The sequence is
//! strictly ordered and no step is skipped:
//!
//! ```text
//! upload → create thread → post instructions → create run (file attached)
//!        → poll status until terminal → read newest message → write <name>.json
//! ```
//!
//! A file is never retried. Any failure aborts that file only and is handed
//! back to the caller.
//!
//! # Key Features
//!
//! - **Bounded polling**: fixed interval (optionally backing off) with an
//!   attempt limit and an elapsed-time ceiling
//! - **Typed failures**: terminal run states and timeouts are distinct errors
//! - **Configurable instructions**: the prompt is an opaque template
//! - **Best-effort persistence**: write failures are logged, not fatal
//!
//! # Example Usage
//!
//! ```no_run
//! use ledgerscan_extractor::{Extractor, ExtractorConfig, ResultWriter};
//! use ledgerscan_domain::SourceFile;
//! use ledgerscan_openai::OpenAiClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = OpenAiClient::new("sk-...")?;
//! let writer = ResultWriter::new("bank_output");
//! let extractor = Extractor::new(api, "asst_...", writer, ExtractorConfig::default())?;
//!
//! let source = SourceFile::new("statements/BG18-jan.csv");
//! let file_id = extractor.upload(&source).await?;
//! let outcome = extractor.process(&file_id, &source).await?;
//!
//! println!("{}", outcome.text);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod poll;
mod prompt;
mod types;
mod writer;


pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use poll::{PollDelays, PollSchedule};
pub use prompt::{PromptBuilder, DEFAULT_INSTRUCTIONS, FILE_TYPE_PLACEHOLDER};
pub use types::ExtractionOutcome;
pub use writer::ResultWriter;
