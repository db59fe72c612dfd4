//! Scripted in-memory [`AssistantApi`] for tests
//!
//! Makes no network calls. Run statuses are replayed from a script, the final
//! assistant reply is fixed, and every call is recorded so tests can assert
//! exactly which remote operations happened.

use crate::ApiError;
use async_trait::async_trait;
use ledgerscan_domain::{
    AssistantApi, FileId, RunId, RunSnapshot, RunStatus, ThreadId, ThreadMessage,
};
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// Remote operation kinds, used to inject failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// File upload
    Upload,
    /// Thread creation
    CreateThread,
    /// Message post
    PostMessage,
    /// Run creation
    CreateRun,
    /// Run status check
    RunStatus,
    /// Message listing
    ListMessages,
}

/// A call recorded by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    /// `upload_file` with the uploaded file's base name
    Upload(String),
    /// `create_thread`
    CreateThread,
    /// `post_message` with the message text
    PostMessage(String),
    /// `create_run` with the assistant and file ids
    CreateRun {
        /// Assistant the run targets
        assistant_id: String,
        /// File attached to the run
        file_id: String,
    },
    /// `run_status`
    RunStatus,
    /// `list_messages`
    ListMessages,
}

impl MockCall {
    fn step(&self) -> Step {
        match self {
            MockCall::Upload(_) => Step::Upload,
            MockCall::CreateThread => Step::CreateThread,
            MockCall::PostMessage(_) => Step::PostMessage,
            MockCall::CreateRun { .. } => Step::CreateRun,
            MockCall::RunStatus => Step::RunStatus,
            MockCall::ListMessages => Step::ListMessages,
        }
    }
}

#[derive(Debug)]
struct MockState {
    statuses: VecDeque<RunStatus>,
    fallback_status: RunStatus,
    messages: Vec<ThreadMessage>,
    step_failures: HashMap<Step, (u16, String)>,
    upload_failures: HashMap<String, (u16, String)>,
    calls: Vec<MockCall>,
    next_id: usize,
}

/// Mock assistant service for deterministic testing
///
/// # Examples
///
/// ```
/// use ledgerscan_openai::{MockAssistantApi, Step};
///
/// let mut api = MockAssistantApi::new("{\"rows\":[]}");
/// api.fail_step(Step::CreateRun, 500, "boom");
/// assert_eq!(api.call_count(Step::CreateRun), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockAssistantApi {
    state: Arc<Mutex<MockState>>,
}

impl MockAssistantApi {
    /// Create a mock whose runs complete immediately and whose thread holds
    /// a single assistant message with `reply` as text
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                statuses: VecDeque::new(),
                fallback_status: RunStatus::Completed,
                messages: vec![ThreadMessage::text(reply)],
                step_failures: HashMap::new(),
                upload_failures: HashMap::new(),
                calls: Vec::new(),
                next_id: 0,
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Queue run statuses, returned in order by `run_status`
    pub fn push_statuses(&mut self, statuses: impl IntoIterator<Item = RunStatus>) {
        self.state().statuses.extend(statuses);
    }

    /// Status returned once the queued script is exhausted
    pub fn set_fallback_status(&mut self, status: RunStatus) {
        self.state().fallback_status = status;
    }

    /// Replace the messages returned by `list_messages`
    pub fn set_messages(&mut self, messages: Vec<ThreadMessage>) {
        self.state().messages = messages;
    }

    /// Make every call of `step` fail with the given HTTP status
    pub fn fail_step(&mut self, step: Step, status: u16, body: impl Into<String>) {
        self.state().step_failures.insert(step, (status, body.into()));
    }

    /// Make uploads of the file named `file_name` fail with the given HTTP status
    pub fn fail_upload_for(
        &mut self,
        file_name: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) {
        self.state()
            .upload_failures
            .insert(file_name.into(), (status, body.into()));
    }

    /// All recorded calls, in order
    pub fn calls(&self) -> Vec<MockCall> {
        self.state().calls.clone()
    }

    /// Number of recorded calls of one kind
    pub fn call_count(&self, step: Step) -> usize {
        self.state().calls.iter().filter(|c| c.step() == step).count()
    }

    /// Base names of every file passed to `upload_file`
    pub fn uploaded_files(&self) -> Vec<String> {
        self.state()
            .calls
            .iter()
            .filter_map(|c| match c {
                MockCall::Upload(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    /// Text of every posted message
    pub fn posted_messages(&self) -> Vec<String> {
        self.state()
            .calls
            .iter()
            .filter_map(|c| match c {
                MockCall::PostMessage(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Record a call and return the injected failure for its step, if any
    fn record(&self, call: MockCall) -> Result<usize, ApiError> {
        let mut state = self.state();
        let step = call.step();
        state.calls.push(call);

        if let Some((status, body)) = state.step_failures.get(&step) {
            return Err(ApiError::Status {
                endpoint: endpoint_name(step),
                status: *status,
                body: body.clone(),
            });
        }

        state.next_id += 1;
        Ok(state.next_id)
    }
}

impl Default for MockAssistantApi {
    fn default() -> Self {
        Self::new("{}")
    }
}

fn endpoint_name(step: Step) -> &'static str {
    match step {
        Step::Upload => "upload",
        Step::CreateThread => "thread creation",
        Step::PostMessage => "message post",
        Step::CreateRun => "run creation",
        Step::RunStatus => "run status",
        Step::ListMessages => "message retrieval",
    }
}

#[async_trait]
impl AssistantApi for MockAssistantApi {
    type Error = ApiError;

    async fn upload_file(&self, path: &Path) -> Result<FileId, ApiError> {
        tokio::fs::metadata(path).await.map_err(|source| ApiError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let id = self.record(MockCall::Upload(name.clone()))?;

        if let Some((status, body)) = self.state().upload_failures.get(&name) {
            return Err(ApiError::Status {
                endpoint: "upload",
                status: *status,
                body: body.clone(),
            });
        }

        Ok(FileId::new(format!("file-{}", id)))
    }

    async fn create_thread(&self) -> Result<ThreadId, ApiError> {
        self.record(MockCall::CreateThread)?;
        let count = self.call_count(Step::CreateThread);
        Ok(ThreadId::new(format!("thread_{}", count)))
    }

    async fn post_message(&self, _thread: &ThreadId, content: &str) -> Result<(), ApiError> {
        self.record(MockCall::PostMessage(content.to_string()))?;
        Ok(())
    }

    async fn create_run(
        &self,
        _thread: &ThreadId,
        assistant_id: &str,
        file: &FileId,
    ) -> Result<RunId, ApiError> {
        self.record(MockCall::CreateRun {
            assistant_id: assistant_id.to_string(),
            file_id: file.to_string(),
        })?;
        let count = self.call_count(Step::CreateRun);
        Ok(RunId::new(format!("run_{}", count)))
    }

    async fn run_status(&self, _thread: &ThreadId, run: &RunId) -> Result<RunSnapshot, ApiError> {
        self.record(MockCall::RunStatus)?;

        let status = {
            let mut state = self.state();
            let next = state.statuses.pop_front();
            next.unwrap_or_else(|| state.fallback_status.clone())
        };
        let payload = format!(r#"{{"id":"{}","status":"{}"}}"#, run, status);
        Ok(RunSnapshot::new(status, payload))
    }

    async fn list_messages(&self, _thread: &ThreadId) -> Result<Vec<ThreadMessage>, ApiError> {
        self.record(MockCall::ListMessages)?;
        Ok(self.state().messages.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_status_script_then_fallback() {
        let mut api = MockAssistantApi::new("done");
        api.push_statuses([RunStatus::Queued, RunStatus::InProgress]);
        api.set_fallback_status(RunStatus::Completed);

        let thread = ThreadId::new("thread_1");
        let run = RunId::new("run_1");
        assert_eq!(api.run_status(&thread, &run).await.unwrap().status, RunStatus::Queued);
        assert_eq!(api.run_status(&thread, &run).await.unwrap().status, RunStatus::InProgress);
        assert_eq!(api.run_status(&thread, &run).await.unwrap().status, RunStatus::Completed);
        assert_eq!(api.call_count(Step::RunStatus), 3);
    }

    #[tokio::test]
    async fn test_step_failure() {
        let mut api = MockAssistantApi::default();
        api.fail_step(Step::CreateThread, 500, "server error");

        let err = api.create_thread().await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(api.call_count(Step::CreateThread), 1);
    }

    #[tokio::test]
    async fn test_upload_failure_for_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("BG18-jan.csv");
        std::fs::write(&path, "a,b\n1,2\n").unwrap();

        let mut api = MockAssistantApi::default();
        api.fail_upload_for("BG18-jan.csv", 401, "unauthorized");

        let err = api.upload_file(&path).await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(api.uploaded_files(), vec!["BG18-jan.csv".to_string()]);
    }

    #[tokio::test]
    async fn test_upload_missing_file_is_io_error() {
        let api = MockAssistantApi::default();
        let result = api.upload_file(Path::new("/no/such/file.csv")).await;
        assert!(matches!(result, Err(ApiError::Io { .. })));
        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_mock_clone_shares_state() {
        let api1 = MockAssistantApi::default();
        let api2 = api1.clone();

        api1.record(MockCall::CreateThread).unwrap();

        assert_eq!(api1.call_count(Step::CreateThread), 1);
        assert_eq!(api2.call_count(Step::CreateThread), 1);
    }
}
