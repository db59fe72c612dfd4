//! Integration tests for the Assistants HTTP client
//!
//! Each test starts a local axum stub of the Assistants API and points
//! `OpenAiClient` at it, so request shapes and error handling are checked
//! end-to-end over real HTTP.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    Json, Router,
};
use ledgerscan_domain::{AssistantApi, FileId, RunId, RunStatus, ThreadId};
use ledgerscan_openai::{ApiError, OpenAiClient};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A request as seen by the stub
#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    path: String,
    authorization: Option<String>,
    beta: Option<String>,
    content_type: Option<String>,
    body: Vec<u8>,
}

struct StubInner {
    requests: Vec<Recorded>,
    statuses: VecDeque<&'static str>,
    upload_status: StatusCode,
    thread_body: Value,
}

#[derive(Clone)]
struct Stub {
    inner: Arc<Mutex<StubInner>>,
}

impl Stub {
    fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(StubInner {
                requests: Vec::new(),
                statuses: VecDeque::from(vec!["queued", "in_progress", "completed"]),
                upload_status: StatusCode::OK,
                thread_body: json!({ "id": "thread_abc", "object": "thread" }),
            })),
        }
    }

    fn requests(&self) -> Vec<Recorded> {
        self.inner.lock().unwrap().requests.clone()
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}

async fn handle(
    State(stub): State<Stub>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let mut inner = stub.inner.lock().unwrap();
    inner.requests.push(Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        authorization: header(&headers, "authorization"),
        beta: header(&headers, "openai-beta"),
        content_type: header(&headers, "content-type"),
        body: body.to_vec(),
    });

    let path = uri.path().trim_start_matches("/v1/").to_string();
    let segments: Vec<&str> = path.split('/').collect();

    match (method.as_str(), segments.as_slice()) {
        ("POST", ["files"]) => {
            if inner.upload_status != StatusCode::OK {
                return (
                    inner.upload_status,
                    Json(json!({ "error": { "message": "Incorrect API key provided" } })),
                );
            }
            (StatusCode::OK, Json(json!({ "id": "file-abc", "purpose": "assistants" })))
        }
        ("POST", ["threads"]) => (StatusCode::OK, Json(inner.thread_body.clone())),
        ("POST", ["threads", _, "messages"]) => {
            (StatusCode::OK, Json(json!({ "id": "msg_user", "role": "user" })))
        }
        ("POST", ["threads", _, "runs"]) => {
            (StatusCode::OK, Json(json!({ "id": "run_abc", "status": "queued" })))
        }
        ("GET", ["threads", _, "runs", run_id]) => {
            let status = inner.statuses.pop_front().unwrap_or("completed");
            (
                StatusCode::OK,
                Json(json!({ "id": run_id, "status": status, "last_error": null })),
            )
        }
        ("GET", ["threads", _, "messages"]) => (
            StatusCode::OK,
            Json(json!({
                "object": "list",
                "data": [
                    { "id": "msg_2", "role": "assistant",
                      "content": [ { "type": "text",
                                     "text": { "value": "{\"rows\":[]}", "annotations": [] } } ] },
                    { "id": "msg_user", "role": "user",
                      "content": [ { "type": "text",
                                     "text": { "value": "instructions", "annotations": [] } } ] }
                ]
            })),
        ),
        _ => (StatusCode::NOT_FOUND, Json(json!({ "error": "no route" }))),
    }
}

/// Start the stub on an ephemeral port and return its base URL
async fn spawn_stub(stub: Stub) -> String {
    let app = Router::new().fallback(handle).with_state(stub);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/v1", addr)
}

fn client_for(base_url: &str) -> OpenAiClient {
    OpenAiClient::with_options("sk-test-key", base_url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_upload_sends_multipart_with_purpose() {
    let stub = Stub::new();
    let base = spawn_stub(stub.clone()).await;
    let client = client_for(&base);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("BG18-jan.csv");
    std::fs::write(&path, "date,amount\n01/02/2024,10.50\n").unwrap();

    let file_id = client.upload_file(&path).await.unwrap();
    assert_eq!(file_id.as_str(), "file-abc");

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    let upload = &requests[0];
    assert_eq!(upload.method, "POST");
    assert_eq!(upload.path, "/v1/files");
    assert_eq!(upload.authorization.as_deref(), Some("Bearer sk-test-key"));
    assert_eq!(upload.beta.as_deref(), Some("assistants=v2"));
    assert!(upload
        .content_type
        .as_deref()
        .unwrap_or_default()
        .starts_with("multipart/form-data"));

    let body = String::from_utf8_lossy(&upload.body);
    assert!(body.contains("name=\"file\""));
    assert!(body.contains("filename=\"BG18-jan.csv\""));
    assert!(body.contains("name=\"purpose\""));
    assert!(body.contains("assistants"));
    assert!(body.contains("01/02/2024,10.50"));
}

#[tokio::test]
async fn test_upload_unauthorized_carries_status_and_body() {
    let stub = Stub::new();
    stub.inner.lock().unwrap().upload_status = StatusCode::UNAUTHORIZED;
    let base = spawn_stub(stub.clone()).await;
    let client = client_for(&base);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stmt.csv");
    std::fs::write(&path, "a,b\n").unwrap();

    let err = client.upload_file(&path).await.unwrap_err();
    assert!(err.is_unauthorized());
    match err {
        ApiError::Status { status, body, .. } => {
            assert_eq!(status, 401);
            assert!(body.contains("Incorrect API key provided"));
        }
        other => panic!("Expected Status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_thread_without_id_is_schema_error() {
    let stub = Stub::new();
    stub.inner.lock().unwrap().thread_body = json!({ "object": "thread" });
    let base = spawn_stub(stub.clone()).await;
    let client = client_for(&base);

    let err = client.create_thread().await.unwrap_err();
    assert!(matches!(err, ApiError::Schema { endpoint: "thread creation", .. }));
}

#[tokio::test]
async fn test_message_and_run_bodies() {
    let stub = Stub::new();
    let base = spawn_stub(stub.clone()).await;
    let client = client_for(&base);

    let thread = client.create_thread().await.unwrap();
    assert_eq!(thread.as_str(), "thread_abc");

    client
        .post_message(&thread, "The uploaded file is a CSV file")
        .await
        .unwrap();
    let run = client
        .create_run(&thread, "asst_123", &FileId::new("file-abc"))
        .await
        .unwrap();
    assert_eq!(run.as_str(), "run_abc");

    let requests = stub.requests();
    assert_eq!(requests.len(), 3);

    let thread_body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(thread_body, json!({}));

    assert_eq!(requests[1].path, "/v1/threads/thread_abc/messages");
    let message: Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(
        message,
        json!({ "role": "user", "content": "The uploaded file is a CSV file" })
    );

    assert_eq!(requests[2].path, "/v1/threads/thread_abc/runs");
    let run_body: Value = serde_json::from_slice(&requests[2].body).unwrap();
    assert_eq!(
        run_body,
        json!({
            "assistant_id": "asst_123",
            "tool_resources": { "code_interpreter": { "file_ids": ["file-abc"] } }
        })
    );

    for request in &requests {
        assert_eq!(request.authorization.as_deref(), Some("Bearer sk-test-key"));
        assert_eq!(request.beta.as_deref(), Some("assistants=v2"));
    }
}

#[tokio::test]
async fn test_run_status_and_messages() {
    let stub = Stub::new();
    let base = spawn_stub(stub.clone()).await;
    let client = client_for(&base);

    let thread = ThreadId::new("thread_abc");
    let run = RunId::new("run_abc");

    let first = client.run_status(&thread, &run).await.unwrap();
    assert_eq!(first.status, RunStatus::Queued);
    assert!(first.payload.contains("\"run_abc\""));
    assert_eq!(client.run_status(&thread, &run).await.unwrap().status, RunStatus::InProgress);
    assert_eq!(client.run_status(&thread, &run).await.unwrap().status, RunStatus::Completed);

    let messages = client.list_messages(&thread).await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].first_text(), Some("{\"rows\":[]}"));
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    // Port 9 (discard) is closed on test machines
    let client = client_for("http://127.0.0.1:9/v1");
    let err = client.create_thread().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
