//! Async driver for the conversation session
//!
//! Single-task event loop: user-interface events and completion callbacks
//! arrive on one mpsc channel, each is fed through the pure transition, and
//! the resulting effects run in spawned tasks that feed their outcomes back
//! into the same channel. Every committed state change is broadcast to
//! observers as a snapshot.

use super::transition::TransitionResult;
use super::{transition, Effect, Event, SessionState};
use crate::client::RelayClient;
use crate::speech::{CaptureEvent, SpeechCapture};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc};

const EVENT_BUFFER: usize = 32;
const SIGNAL_BUFFER: usize = 32;

/// Signals broadcast to session observers
#[derive(Debug, Clone)]
pub enum SessionSignal {
    /// The state changed; observers re-derive their presentation from the
    /// snapshot
    State(SessionState),
    /// A user-visible notification, emitted exactly once per failure
    Alert { message: String },
}

/// The session runtime has stopped and no longer accepts events
#[derive(Debug, Error)]
#[error("conversation session has stopped")]
pub struct SessionClosed;

/// Cheap handle for feeding events into a running session
#[derive(Clone)]
pub struct SessionHandle {
    event_tx: mpsc::Sender<Event>,
    signal_tx: broadcast::Sender<SessionSignal>,
}

impl SessionHandle {
    pub async fn send(&self, event: Event) -> Result<(), SessionClosed> {
        self.event_tx.send(event).await.map_err(|_| SessionClosed)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionSignal> {
        self.signal_tx.subscribe()
    }
}

/// Conversation session runtime, generic over its relay client and speech
/// capture provider
pub struct SessionRuntime<R, C> {
    session_id: String,
    state: SessionState,
    relay: Arc<R>,
    capture: Arc<C>,
    event_rx: mpsc::Receiver<Event>,
    event_tx: mpsc::Sender<Event>,
    signal_tx: broadcast::Sender<SessionSignal>,
}

impl<R, C> SessionRuntime<R, C>
where
    R: RelayClient + 'static,
    C: SpeechCapture + 'static,
{
    /// Create a session. Speech support is probed here, once; an unsupported
    /// provider permanently disables the listening affordance.
    pub fn new(relay: Arc<R>, capture: Arc<C>) -> (Self, SessionHandle) {
        let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
        let (signal_tx, _) = broadcast::channel(SIGNAL_BUFFER);

        let session_id = uuid::Uuid::new_v4().to_string();
        let speech_supported = capture.is_supported();
        if !speech_supported {
            tracing::warn!(
                session_id = %session_id,
                "Speech capture unavailable; listening disabled for this session"
            );
        }

        let handle = SessionHandle {
            event_tx: event_tx.clone(),
            signal_tx: signal_tx.clone(),
        };

        let runtime = Self {
            session_id,
            state: SessionState::new(speech_supported),
            relay,
            capture,
            event_rx,
            event_tx,
            signal_tx,
        };

        (runtime, handle)
    }

    /// Process events until every handle is dropped
    pub async fn run(mut self) {
        tracing::info!(session_id = %self.session_id, "Starting conversation session");

        while let Some(event) = self.event_rx.recv().await {
            self.process_event(event);
        }

        tracing::info!(session_id = %self.session_id, "Conversation session stopped");
    }

    fn process_event(&mut self, event: Event) {
        match transition(&self.state, event) {
            Ok(TransitionResult { new_state, effects }) => {
                self.state = new_state;
                let _ = self
                    .signal_tx
                    .send(SessionSignal::State(self.state.clone()));
                for effect in effects {
                    self.execute_effect(effect);
                }
            }
            Err(err) => {
                // Rejections are no-ops: no state change, no signal.
                tracing::debug!(
                    session_id = %self.session_id,
                    error = %err,
                    "Event rejected"
                );
            }
        }
    }

    fn execute_effect(&self, effect: Effect) {
        match effect {
            Effect::CallRelay { transcript } => {
                let relay = self.relay.clone();
                let event_tx = self.event_tx.clone();
                let session_id = self.session_id.clone();
                tokio::spawn(async move {
                    let event = match relay.relay(&transcript).await {
                        Ok(text) => Event::ReplyReceived { text },
                        Err(e) => {
                            tracing::warn!(
                                session_id = %session_id,
                                error = %e,
                                "Relay call failed"
                            );
                            Event::ReplyFailed {
                                message: e.to_string(),
                            }
                        }
                    };
                    let _ = event_tx.send(event).await;
                });
            }

            Effect::ScheduleCannedReply { text, delay } => {
                let event_tx = self.event_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = event_tx.send(Event::ReplyReceived { text }).await;
                });
            }

            Effect::StartCapture => match self.capture.start() {
                Ok(mut events) => {
                    let event_tx = self.event_tx.clone();
                    tokio::spawn(async move {
                        while let Some(captured) = events.recv().await {
                            let event = match captured {
                                CaptureEvent::Transcript { text } => {
                                    Event::SpeechResult { transcript: text }
                                }
                                CaptureEvent::Error { message } => Event::SpeechError { message },
                                CaptureEvent::Ended => Event::CaptureEnded,
                            };
                            if event_tx.send(event).await.is_err() {
                                break;
                            }
                        }
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        session_id = %self.session_id,
                        error = %e,
                        "Speech capture failed to start"
                    );
                    // Feed the failure back through the machine so the
                    // Listening phase resolves like any other capture error.
                    let event_tx = self.event_tx.clone();
                    let message = e.to_string();
                    tokio::spawn(async move {
                        let _ = event_tx.send(Event::SpeechError { message }).await;
                    });
                }
            },

            Effect::NotifyUser { message } => {
                tracing::warn!(
                    session_id = %self.session_id,
                    notice = %message,
                    "User notification"
                );
                let _ = self.signal_tx.send(SessionSignal::Alert { message });
            }
        }
    }
}
