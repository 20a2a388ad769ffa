//! Mock implementations for testing
//!
//! These mocks enable exercising the session runtime without real I/O.

use crate::client::RelayClient;
use crate::relay::RelayError;
use crate::speech::{CaptureEvent, SpeechCapture, SpeechError};
use crate::transcript::Turn;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::mpsc;

/// Mock relay client that returns queued results
pub struct MockRelayClient {
    responses: Mutex<VecDeque<Result<String, RelayError>>>,
    /// Record of every transcript relayed
    requests: Mutex<Vec<Vec<Turn>>>,
}

impl MockRelayClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful reply
    pub fn queue_reply(&self, text: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Ok(text.into()));
    }

    /// Queue a failure
    pub fn queue_error(&self, error: RelayError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<Vec<Turn>> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockRelayClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RelayClient for MockRelayClient {
    async fn relay(&self, transcript: &[Turn]) -> Result<String, RelayError> {
        self.requests.lock().unwrap().push(transcript.to_vec());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RelayError::Network("no mock response queued".to_string())))
    }
}

/// Speech capture provider that replays a fixed script
pub struct ScriptedCapture {
    script: Vec<CaptureEvent>,
    starts: AtomicUsize,
}

impl ScriptedCapture {
    pub fn new(script: Vec<CaptureEvent>) -> Self {
        Self {
            script,
            starts: AtomicUsize::new(0),
        }
    }

    pub fn times_started(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }
}

impl SpeechCapture for ScriptedCapture {
    fn is_supported(&self) -> bool {
        true
    }

    fn start(&self) -> Result<mpsc::Receiver<CaptureEvent>, SpeechError> {
        self.starts.fetch_add(1, Ordering::SeqCst);

        let (tx, rx) = mpsc::channel(8);
        let events = self.script.clone();
        tokio::spawn(async move {
            for event in events {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
        });

        Ok(rx)
    }
}
