//! Speech-to-text capability adapter
//!
//! Speech capture is a platform capability; a target environment substitutes
//! its own provider behind `SpeechCapture`. Capability detection happens
//! once at session start, and an unsupported provider permanently disables
//! the listening affordance for that session.

use thiserror::Error;
use tokio::sync::mpsc;

/// Events emitted by an active capture.
///
/// Capture is single-utterance: a provider delivers at most one `Transcript`,
/// then `Ended`. `Ended` may also arrive alone (the user said nothing) or
/// after an `Error`.
#[derive(Debug, Clone)]
pub enum CaptureEvent {
    Transcript { text: String },
    Error { message: String },
    Ended,
}

/// Capture failure, including refusal to start
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SpeechError {
    pub message: String,
}

impl SpeechError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Platform speech capture capability
pub trait SpeechCapture: Send + Sync {
    /// Whether this environment can capture speech at all
    fn is_supported(&self) -> bool;

    /// Begin one microphone capture and stream its events.
    ///
    /// The session enforces exclusivity (one active capture per session);
    /// providers may additionally refuse a start they cannot honor.
    fn start(&self) -> Result<mpsc::Receiver<CaptureEvent>, SpeechError>;
}

/// Provider for environments without speech capture
pub struct UnsupportedCapture;

impl SpeechCapture for UnsupportedCapture {
    fn is_supported(&self) -> bool {
        false
    }

    fn start(&self) -> Result<mpsc::Receiver<CaptureEvent>, SpeechError> {
        Err(SpeechError::new("speech capture is not available"))
    }
}
