//! `OpenAI`-compatible chat-completions provider

use super::{CompletionService, UpstreamError};
use crate::transcript::{Role, Turn};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fixed model identifier; the relay never selects per-request.
const MODEL: &str = "gpt-3.5-turbo";

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Chat-completions service implementation
pub struct OpenAiService {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl OpenAiService {
    /// `base_url`, when given, points at the API root (e.g.
    /// `https://api.openai.com/v1`); the chat-completions path is appended.
    pub fn new(api_key: String, base_url: Option<&str>) -> Self {
        let endpoint = match base_url {
            Some(base) => format!("{}/chat/completions", base.trim_end_matches('/')),
            None => DEFAULT_ENDPOINT.to_string(),
        };

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key,
            endpoint,
        }
    }

    fn translate_request(transcript: &[Turn]) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: MODEL.to_string(),
            messages: transcript.iter().map(WireMessage::from).collect(),
        }
    }

    fn normalize_response(resp: ChatCompletionResponse) -> Result<String, UpstreamError> {
        let choice = resp
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| UpstreamError::malformed("No choices in response"))?;

        choice
            .message
            .content
            .ok_or_else(|| UpstreamError::malformed("First choice has no content"))
    }

    fn classify_failure(status: reqwest::StatusCode, body: &str) -> UpstreamError {
        if let Ok(error_resp) = serde_json::from_str::<ApiErrorResponse>(body) {
            let message = error_resp.error.message;
            return match status.as_u16() {
                401 | 403 => UpstreamError::auth(format!("Authentication failed: {message}")),
                429 => UpstreamError::rate_limit(format!("Rate limit exceeded: {message}")),
                400 => UpstreamError::invalid_request(format!("Invalid request: {message}")),
                500..=599 => UpstreamError::server_error(format!("Server error: {message}")),
                _ => UpstreamError::unknown(format!("HTTP {status}: {message}")),
            };
        }
        UpstreamError::unknown(format!("HTTP {status} error: {body}"))
    }
}

#[async_trait]
impl CompletionService for OpenAiService {
    async fn complete(&self, transcript: &[Turn]) -> Result<String, UpstreamError> {
        let request = Self::translate_request(transcript);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    UpstreamError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    UpstreamError::network(format!("Connection failed: {e}"))
                } else {
                    UpstreamError::unknown(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::classify_failure(status, &body));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| UpstreamError::malformed(format!("Failed to parse response: {e}")))?;

        Self::normalize_response(parsed)
    }

    fn model_id(&self) -> &str {
        MODEL
    }
}

// Wire types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

impl From<&Turn> for WireMessage {
    fn from(turn: &Turn) -> Self {
        let role = match turn.role {
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        Self {
            role: role.to_string(),
            content: Some(turn.content.clone()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: WireMessage,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}
