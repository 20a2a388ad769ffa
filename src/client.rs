//! HTTP client for the relay contract
//!
//! The conversation session reaches the relay through the `RelayClient`
//! trait so the runtime can be tested with mock implementations.

use crate::api::{ChatRequest, ChatResponse, ErrorResponse};
use crate::relay::RelayError;
use crate::transcript::Turn;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for the relay exchange
#[async_trait]
pub trait RelayClient: Send + Sync {
    /// Relay the full transcript and return the assistant's reply text
    async fn relay(&self, transcript: &[Turn]) -> Result<String, RelayError>;
}

/// Production client speaking `POST /api/chat`
pub struct HttpRelayClient {
    client: Client,
    endpoint: String,
}

impl HttpRelayClient {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        let endpoint = format!("{}/api/chat", base_url.as_ref().trim_end_matches('/'));

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self { client, endpoint }
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn relay(&self, transcript: &[Turn]) -> Result<String, RelayError> {
        let request = ChatRequest {
            messages: transcript.to_vec(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RelayError::Network(format!("request timeout: {e}"))
                } else if e.is_connect() {
                    RelayError::Network(format!("connection failed: {e}"))
                } else {
                    RelayError::Network(format!("request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::Network(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map_or_else(|_| format!("HTTP {status}"), |e| e.error);
            return Err(RelayError::Refused(message));
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| RelayError::Protocol(format!("unexpected body: {e}")))?;

        Ok(parsed.content)
    }
}
