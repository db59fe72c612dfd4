//! Assistants API client
//!
//! Talks to the hosted Assistants (v2) HTTP API.
//!
//! # Features
//!
//! - Multipart file upload tagged for assistant use
//! - Thread, message and run creation
//! - Run status lookup and message listing
//! - Per-request timeout
//!
//! Calls are never retried here. Whether a failure is fatal is decided by
//! the caller.
//!
//! # Examples
//!
//! ```no_run
//! use ledgerscan_openai::OpenAiClient;
//!
//! let client = OpenAiClient::new("sk-...").unwrap();
//! ```

use crate::schema::{
    CodeInterpreterResources, CreateMessageRequest, CreateRunRequest, MessageListResponse,
    ObjectResponse, RunResponse, ToolResources,
};
use crate::ApiError;
use async_trait::async_trait;
use ledgerscan_domain::{
    AssistantApi, FileId, RunId, RunSnapshot, RunStatus, ThreadId, ThreadMessage,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default timeout for a single request (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Header selecting the Assistants API version
const BETA_HEADER: &str = "OpenAI-Beta";
const BETA_VALUE: &str = "assistants=v2";

/// reqwest-backed [`AssistantApi`] implementation
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl OpenAiClient {
    /// Create a client for the default endpoint
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the key is empty or the HTTP client
    /// cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_options(api_key, DEFAULT_BASE_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with an explicit base URL and per-request timeout
    pub fn with_options(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ApiError::Config("API key must not be empty".to_string()));
        }

        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ApiError::Config("base URL must not be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a request with auth and version headers attached
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .header(BETA_HEADER, BETA_VALUE)
    }

    /// Send a request and return the status with the raw body
    async fn send(request: RequestBuilder) -> Result<(StatusCode, String), ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }

    /// Send a request, failing on non-success statuses
    async fn send_checked(
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<String, ApiError> {
        let (status, body) = Self::send(request).await?;
        check_status(endpoint, status, body)
    }
}

/// Map a non-success status to `ApiError::Status`, pretty-printing JSON bodies
fn check_status(
    endpoint: &'static str,
    status: StatusCode,
    body: String,
) -> Result<String, ApiError> {
    if status.is_success() {
        return Ok(body);
    }

    let body = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| serde_json::to_string_pretty(&v).ok())
        .unwrap_or(body);

    Err(ApiError::Status {
        endpoint,
        status: status.as_u16(),
        body,
    })
}

/// Decode a body into its endpoint schema
///
/// Non-JSON bodies become `Decode`; JSON with missing or mistyped fields
/// becomes `Schema`.
fn decode<T: DeserializeOwned>(endpoint: &'static str, body: &str) -> Result<T, ApiError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| ApiError::Decode {
        endpoint,
        message: e.to_string(),
    })?;

    serde_json::from_value(value).map_err(|e| ApiError::Schema {
        endpoint,
        message: e.to_string(),
        body: body.to_string(),
    })
}

#[async_trait]
impl AssistantApi for OpenAiClient {
    type Error = ApiError;

    async fn upload_file(&self, path: &Path) -> Result<FileId, ApiError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name))
            .text("purpose", "assistants");

        let request = self.request(Method::POST, "/files").multipart(form);
        let (status, body) = Self::send(request).await?;
        debug!("Upload response for {}: {}", path.display(), body);

        let body = check_status("upload", status, body)?;
        let file: ObjectResponse = decode("upload", &body)?;
        Ok(FileId::new(file.id))
    }

    async fn create_thread(&self) -> Result<ThreadId, ApiError> {
        let request = self
            .request(Method::POST, "/threads")
            .json(&serde_json::json!({}));

        let body = Self::send_checked("thread creation", request).await?;
        let thread: ObjectResponse = decode("thread creation", &body)?;
        Ok(ThreadId::new(thread.id))
    }

    async fn post_message(&self, thread: &ThreadId, content: &str) -> Result<(), ApiError> {
        let request = self
            .request(Method::POST, &format!("/threads/{}/messages", thread))
            .json(&CreateMessageRequest {
                role: "user",
                content,
            });

        Self::send_checked("message post", request).await?;
        Ok(())
    }

    async fn create_run(
        &self,
        thread: &ThreadId,
        assistant_id: &str,
        file: &FileId,
    ) -> Result<RunId, ApiError> {
        let request = self
            .request(Method::POST, &format!("/threads/{}/runs", thread))
            .json(&CreateRunRequest {
                assistant_id,
                tool_resources: ToolResources {
                    code_interpreter: CodeInterpreterResources {
                        file_ids: vec![file.as_str()],
                    },
                },
            });

        let body = Self::send_checked("run creation", request).await?;
        let run: ObjectResponse = decode("run creation", &body)?;
        Ok(RunId::new(run.id))
    }

    async fn run_status(&self, thread: &ThreadId, run: &RunId) -> Result<RunSnapshot, ApiError> {
        let request = self.request(Method::GET, &format!("/threads/{}/runs/{}", thread, run));

        let body = Self::send_checked("run status", request).await?;
        let response: RunResponse = decode("run status", &body)?;
        Ok(RunSnapshot::new(RunStatus::parse(&response.status), body))
    }

    async fn list_messages(&self, thread: &ThreadId) -> Result<Vec<ThreadMessage>, ApiError> {
        let request = self.request(Method::GET, &format!("/threads/{}/messages", thread));

        let body = Self::send_checked("message retrieval", request).await?;
        let list: MessageListResponse = decode("message retrieval", &body)?;
        Ok(list.data.into_iter().map(Into::into).collect())
    }
}
