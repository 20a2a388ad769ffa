//! Upstream completion API abstraction
//!
//! Provides a common interface for the third-party chat-completion service
//! the relay forwards transcripts to.

mod error;
mod openai;

pub use error::{UpstreamError, UpstreamErrorKind};
pub use openai::OpenAiService;

use crate::transcript::Turn;
use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for completion providers
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Forward a transcript in one call and return the reply text
    async fn complete(&self, transcript: &[Turn]) -> Result<String, UpstreamError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

/// Logging wrapper for completion services
pub struct LoggingService {
    inner: Arc<dyn CompletionService>,
    model_id: String,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn CompletionService>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl CompletionService for LoggingService {
    async fn complete(&self, transcript: &[Turn]) -> Result<String, UpstreamError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(transcript).await;
        let duration = start.elapsed();

        match &result {
            Ok(reply) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    turns = transcript.len(),
                    reply_chars = reply.len(),
                    "Upstream request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    kind = ?e.kind,
                    error = %e.message,
                    "Upstream request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
