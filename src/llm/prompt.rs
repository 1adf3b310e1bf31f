//! Chat messages sent for each task.

use serde::{Deserialize, Serialize};

/// Model used for commit message suggestions.
pub const COMMIT_MODEL: &str = "deepseek-chat";

/// Model used for diff explanations.
pub const EXPLAIN_MODEL: &str = "deepseek-coder";

/// Low temperature keeps suggestions stable between runs.
pub const TEMPERATURE: f32 = 0.5;

const COMMIT_SYSTEM: &str = "You write concise and clear Git commit messages.";
const EXPLAIN_SYSTEM: &str = "You are a helpful code assistant that explains Git changes.";

/// One chat message on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Messages asking for a commit message for `diff`.
pub fn commit_messages(diff: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(COMMIT_SYSTEM),
        ChatMessage::user(format!(
            "Generate a commit message for the following Git diff:\n\n{}",
            diff
        )),
    ]
}

/// Messages asking for an explanation of `diff`.
pub fn explain_messages(diff: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(EXPLAIN_SYSTEM),
        ChatMessage::user(format!("Explain what was changed in this diff:\n\n{}", diff)),
    ]
}
