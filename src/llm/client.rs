//! DeepSeek chat-completion client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Environment;
use crate::error::LlmError;

use super::prompt::{
    COMMIT_MODEL, ChatMessage, EXPLAIN_MODEL, TEMPERATURE, commit_messages, explain_messages,
};

/// Chat-completion endpoint.
pub const DEFAULT_API_URL: &str = "https://api.deepseek.com/chat/completions";

/// Variable holding the API key.
pub const API_KEY_VAR: &str = "DEEPSEEK_API_KEY";

/// Variable overriding the endpoint.
pub const API_URL_VAR: &str = "DEEPSEEK_API_URL";

/// Marker the API uses for billing failures, matched case-insensitively.
const INSUFFICIENT_BALANCE: &str = "insufficient balance";

/// The language-model operations the flows need.
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Suggest a commit message for `diff`.
    async fn suggest_commit_message(&self, diff: &str) -> Result<String, LlmError>;

    /// Explain in prose what `diff` changes.
    async fn explain_diff(&self, diff: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

/// Response body. Every field is optional so that error bodies and
/// truncated bodies both parse and can be classified afterwards.
#[derive(Debug, Default, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Option<Vec<Choice>>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ResponseMessage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub message: Option<String>,
}

impl ChatCompletionResponse {
    /// Trimmed content of the first choice, if it has any text.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .as_ref()?
            .first()?
            .message
            .as_ref()?
            .content
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    pub fn is_insufficient_balance(&self) -> bool {
        self.error
            .as_ref()
            .and_then(|e| e.message.as_deref())
            .is_some_and(|m| m.to_lowercase().contains(INSUFFICIENT_BALANCE))
    }
}

/// Classify a raw response body.
///
/// With `check_balance` set, a billing error wins over everything else.
pub fn parse_response(raw: &str, check_balance: bool) -> Result<String, LlmError> {
    let response: ChatCompletionResponse = match serde_json::from_str(raw) {
        Ok(r) => r,
        Err(e) => {
            debug!("Response is not a chat completion: {}", e);
            return Err(LlmError::UnexpectedResponse(raw.to_string()));
        }
    };

    if check_balance && response.is_insufficient_balance() {
        return Err(LlmError::InsufficientBalance);
    }

    response
        .first_content()
        .map(String::from)
        .ok_or_else(|| LlmError::UnexpectedResponse(raw.to_string()))
}

/// HTTP client for the DeepSeek API.
#[derive(Debug, Clone)]
pub struct DeepSeekClient {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl DeepSeekClient {
    /// Build a client from an environment overlay.
    ///
    /// A missing key is not an error here; it is reported by the first call.
    pub fn from_env(env: &Environment) -> Result<Self, LlmError> {
        let api_key = env.get(API_KEY_VAR).map(String::from);
        let api_url = env
            .get(API_URL_VAR)
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .to_string();

        if api_url != DEFAULT_API_URL {
            warn!("Using non-default DeepSeek endpoint {}", api_url);
        }

        Self::new(api_key, api_url)
    }

    pub fn new(api_key: Option<String>, api_url: impl Into<String>) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(LlmError::Client)?;
        Ok(Self {
            http,
            api_url: api_url.into(),
            api_key,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
        check_balance: bool,
    ) -> Result<String, LlmError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(LlmError::MissingApiKey)?;

        let request = ChatCompletionRequest {
            model,
            messages,
            temperature: TEMPERATURE,
        };

        debug!(
            "Sending {} message(s) to {} (model {})",
            messages.len(),
            self.api_url,
            model
        );

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(LlmError::Request)?;

        // Billing errors arrive with a non-2xx status, so read the body regardless.
        let status = response.status();
        let raw = response.text().await.map_err(LlmError::Request)?;
        debug!("DeepSeek responded {} with {} bytes", status, raw.len());

        parse_response(&raw, check_balance)
    }
}

#[async_trait]
impl Assistant for DeepSeekClient {
    async fn suggest_commit_message(&self, diff: &str) -> Result<String, LlmError> {
        self.complete(COMMIT_MODEL, &commit_messages(diff), true)
            .await
    }

    async fn explain_diff(&self, diff: &str) -> Result<String, LlmError> {
        self.complete(EXPLAIN_MODEL, &explain_messages(diff), false)
            .await
    }
}
