//! Messages read back from a conversation thread

/// One block of message content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    /// Plain text block
    Text(String),

    /// Any non-text block (images, files); holds the block type
    Other(String),
}

/// A message in a thread, newest first when listed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThreadMessage {
    /// Content blocks in order
    pub content: Vec<MessageContent>,
}

impl ThreadMessage {
    /// Build a message holding a single text block
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            content: vec![MessageContent::Text(value.into())],
        }
    }

    /// Text of the first content block, if that block is text
    pub fn first_text(&self) -> Option<&str> {
        match self.content.first() {
            Some(MessageContent::Text(value)) => Some(value),
            _ => None,
        }
    }
}
