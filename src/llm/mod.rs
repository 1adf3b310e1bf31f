//! DeepSeek chat-completion client and prompt construction.

pub mod client;
pub mod prompt;

pub use client::{API_KEY_VAR, API_URL_VAR, Assistant, DEFAULT_API_URL, DeepSeekClient};
pub use prompt::ChatMessage;
