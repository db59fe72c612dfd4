//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::poll::PollSchedule;
use crate::prompt::PromptBuilder;
use crate::types::ExtractionOutcome;
use crate::writer::ResultWriter;
use ledgerscan_domain::{AssistantApi, FileId, RunId, RunStatus, SourceFile, ThreadId};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs statement files through a hosted assistant, one at a time
pub struct Extractor<A>
where
    A: AssistantApi,
{
    api: A,
    assistant_id: String,
    writer: ResultWriter,
    prompt: PromptBuilder,
    schedule: PollSchedule,
}

impl<A> Extractor<A>
where
    A: AssistantApi,
{
    /// Create a new Extractor
    ///
    /// # Errors
    ///
    /// Returns `ExtractorError::Config` if the configuration is invalid or
    /// the assistant id is empty.
    pub fn new(
        api: A,
        assistant_id: impl Into<String>,
        writer: ResultWriter,
        config: ExtractorConfig,
    ) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;

        let assistant_id = assistant_id.into();
        if assistant_id.trim().is_empty() {
            return Err(ExtractorError::Config("assistant id must not be empty".to_string()));
        }

        Ok(Self {
            api,
            assistant_id,
            writer,
            prompt: PromptBuilder::new(config.instructions.clone()),
            schedule: PollSchedule::from_config(&config),
        })
    }

    /// The underlying assistant service
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Where answers are written
    pub fn writer(&self) -> &ResultWriter {
        &self.writer
    }

    /// Upload a source file's bytes
    pub async fn upload(&self, source: &SourceFile) -> Result<FileId, ExtractorError> {
        info!("Uploading {}", source.path.display());
        let file_id = self
            .api
            .upload_file(&source.path)
            .await
            .map_err(ExtractorError::api)?;
        info!("Uploaded {} as {}", source.file_name(), file_id);
        Ok(file_id)
    }

    /// Run the assistant on an uploaded file and persist its answer
    ///
    /// Creates exactly one thread and one run. A failed write is logged and
    /// reported through `saved_to: None`; it does not fail the call.
    pub async fn process(
        &self,
        file_id: &FileId,
        source: &SourceFile,
    ) -> Result<ExtractionOutcome, ExtractorError> {
        let (thread_id, run_id, poll_attempts) =
            self.run_assistant(file_id, source.kind.label()).await?;

        let text = self.fetch_answer(&thread_id).await?;
        debug!("Assistant answer for {}: {} chars", source.file_name(), text.len());

        let saved_to = match self.writer.write(source, &text) {
            Ok(path) => {
                info!("Assistant output saved to {}", path.display());
                Some(path)
            }
            Err(e) => {
                warn!(
                    "Failed to save output to {}: {}",
                    self.writer.output_path(source).display(),
                    e
                );
                None
            }
        };

        Ok(ExtractionOutcome {
            thread_id,
            run_id,
            text,
            saved_to,
            poll_attempts,
        })
    }

    /// Create the thread, post the instructions, start the run and wait for it
    async fn run_assistant(
        &self,
        file_id: &FileId,
        file_type: &str,
    ) -> Result<(ThreadId, RunId, u32), ExtractorError> {
        let thread_id = self
            .api
            .create_thread()
            .await
            .map_err(ExtractorError::api)?;
        debug!("Created thread {}", thread_id);

        let message = self.prompt.build(file_type);
        self.api
            .post_message(&thread_id, &message)
            .await
            .map_err(ExtractorError::api)?;

        let run_id = self
            .api
            .create_run(&thread_id, &self.assistant_id, file_id)
            .await
            .map_err(ExtractorError::api)?;
        info!("Started run {} on thread {}", run_id, thread_id);

        let attempts = self.wait_for_run(&thread_id, &run_id).await?;
        Ok((thread_id, run_id, attempts))
    }

    /// Poll the run until it completes, fails, or the schedule runs out
    ///
    /// Sleeps before every check, including the first. Returns the number of
    /// checks performed. A service error aborts immediately.
    pub async fn wait_for_run(
        &self,
        thread_id: &ThreadId,
        run_id: &RunId,
    ) -> Result<u32, ExtractorError> {
        let started = Instant::now();
        let mut attempts = 0;

        for delay in self.schedule.delays() {
            tokio::time::sleep(delay).await;
            attempts += 1;

            let snapshot = self
                .api
                .run_status(thread_id, run_id)
                .await
                .map_err(ExtractorError::api)?;
            info!("Run status: {}", snapshot.status);

            if snapshot.status == RunStatus::Completed {
                return Ok(attempts);
            }
            if snapshot.status.is_failure() {
                warn!("Run {} failed: {}", run_id, snapshot.payload);
                return Err(ExtractorError::RunFailed {
                    status: snapshot.status,
                    payload: snapshot.payload,
                });
            }
        }

        Err(ExtractorError::Timeout {
            attempts,
            elapsed: started.elapsed(),
        })
    }

    /// Text of the first content block of the newest message
    async fn fetch_answer(&self, thread_id: &ThreadId) -> Result<String, ExtractorError> {
        let messages = self
            .api
            .list_messages(thread_id)
            .await
            .map_err(ExtractorError::api)?;

        let latest = messages.first().ok_or(ExtractorError::EmptyResponse)?;
        latest
            .first_text()
            .map(str::to_string)
            .ok_or(ExtractorError::MissingText)
    }
}
