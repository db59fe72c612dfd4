//! Request and response bodies for the Assistants endpoints

use ledgerscan_domain::{MessageContent, ThreadMessage};
use serde::{Deserialize, Serialize};

/// Any response whose only field we need is `id` (files, threads, runs)
#[derive(Debug, Deserialize)]
pub(crate) struct ObjectResponse {
    pub id: String,
}

/// Body for `POST /threads/{id}/messages`
#[derive(Debug, Serialize)]
pub(crate) struct CreateMessageRequest<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

/// Body for `POST /threads/{id}/runs`
#[derive(Debug, Serialize)]
pub(crate) struct CreateRunRequest<'a> {
    pub assistant_id: &'a str,
    pub tool_resources: ToolResources<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ToolResources<'a> {
    pub code_interpreter: CodeInterpreterResources<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CodeInterpreterResources<'a> {
    pub file_ids: Vec<&'a str>,
}

/// Response from `GET /threads/{id}/runs/{run_id}`
#[derive(Debug, Deserialize)]
pub(crate) struct RunResponse {
    pub status: String,
}

/// Response from `GET /threads/{id}/messages`
#[derive(Debug, Deserialize)]
pub(crate) struct MessageListResponse {
    pub data: Vec<MessageObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageObject {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContentBlock {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub text: Option<TextBlock>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TextBlock {
    pub value: String,
}

impl From<MessageObject> for ThreadMessage {
    fn from(message: MessageObject) -> Self {
        let content = message
            .content
            .into_iter()
            .map(|block| match block.text {
                Some(text) => MessageContent::Text(text.value),
                None => MessageContent::Other(block.kind.unwrap_or_else(|| "unknown".to_string())),
            })
            .collect();
        ThreadMessage { content }
    }
}
