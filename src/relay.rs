//! The relay operation
//!
//! One stateless operation: forward a transcript to the upstream completion
//! API and return the reply text. Exactly one upstream call per invocation;
//! no retry, no caching, no partial results.

use crate::transcript::Turn;
use crate::upstream::{CompletionService, UpstreamError};
use std::sync::Arc;
use thiserror::Error;

/// Failure of the relay exchange.
///
/// Server-side invocations produce `InvalidTranscript` or `Upstream`; the
/// HTTP client side of the same exchange produces `Network`, `Refused`, or
/// `Protocol`. All variants are terminal for the turn.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("transcript rejected: {0}")]
    InvalidTranscript(&'static str),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error("relay request failed: {0}")]
    Network(String),
    #[error("relay returned an error: {0}")]
    Refused(String),
    #[error("malformed relay response: {0}")]
    Protocol(String),
}

/// Stateless forwarder from transcript to upstream reply
pub struct RelayService {
    upstream: Arc<dyn CompletionService>,
}

impl RelayService {
    pub fn new(upstream: Arc<dyn CompletionService>) -> Self {
        Self { upstream }
    }

    /// Forward the transcript verbatim and return the assistant's reply.
    pub async fn relay(&self, transcript: &[Turn]) -> Result<String, RelayError> {
        validate_transcript(transcript)?;
        let reply = self.upstream.complete(transcript).await?;
        Ok(reply)
    }
}

fn validate_transcript(transcript: &[Turn]) -> Result<(), RelayError> {
    if transcript.is_empty() {
        return Err(RelayError::InvalidTranscript("transcript is empty"));
    }
    if transcript.iter().any(|t| t.content.trim().is_empty()) {
        return Err(RelayError::InvalidTranscript("turn with empty content"));
    }
    Ok(())
}
