//! Pure state transition function

use super::state::{Phase, SessionState};
use super::{Effect, Event, DEMO_REPLY, DEMO_REPLY_DELAY};
use crate::transcript::Turn;
use thiserror::Error;

/// Input answered locally instead of through the relay. Exact match on the
/// trimmed, lowercased draft; no partial matching.
const DEMO_KEYWORD: &str = "demo";

const RELAY_FAILURE_NOTICE: &str = "Failed to get a response. Please try again.";
const SPEECH_FAILURE_NOTICE: &str = "Failed to recognize speech. Please try again.";

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Rejected events. The runtime treats every rejection as a no-op: the state
/// is untouched and no signal is broadcast.
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("draft is empty")]
    EmptyDraft,
    #[error("a reply is already pending")]
    ReplyPending,
    #[error("speech capture is not supported in this session")]
    CaptureUnsupported,
    #[error("speech capture is already active")]
    CaptureActive,
    #[error("invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function: given the same state and event it always
/// produces the same result, with no I/O side effects.
pub fn transition(
    state: &SessionState,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state.phase, event) {
        // ============================================================
        // Draft editing (allowed in every phase)
        // ============================================================
        (_, Event::DraftChanged { text }) => {
            let mut next = state.clone();
            next.draft = text;
            Ok(TransitionResult::new(next))
        }

        // ============================================================
        // Submission
        // ============================================================
        (Phase::AwaitingReply, Event::Submit) => Err(TransitionError::ReplyPending),
        (Phase::Listening, Event::Submit) => Err(TransitionError::CaptureActive),

        (Phase::Idle, Event::Submit) => {
            let draft = state.draft.trim().to_string();
            if draft.is_empty() {
                return Err(TransitionError::EmptyDraft);
            }

            let is_demo = draft.eq_ignore_ascii_case(DEMO_KEYWORD);

            let mut next = state.clone();
            next.transcript.push(Turn::user(draft));
            next.draft.clear();
            next.phase = Phase::AwaitingReply;

            let effect = if is_demo {
                Effect::ScheduleCannedReply {
                    text: DEMO_REPLY.to_string(),
                    delay: DEMO_REPLY_DELAY,
                }
            } else {
                Effect::CallRelay {
                    transcript: next.transcript.clone(),
                }
            };

            Ok(TransitionResult::new(next).with_effect(effect))
        }

        // ============================================================
        // Reply resolution
        // ============================================================
        (Phase::AwaitingReply, Event::ReplyReceived { text }) => {
            let mut next = state.clone();
            next.transcript.push(Turn::assistant(text));
            next.phase = Phase::Idle;
            Ok(TransitionResult::new(next))
        }

        // The submitted user turn persists; nothing is appended for the
        // failed reply and the session stays usable.
        (Phase::AwaitingReply, Event::ReplyFailed { message: _ }) => {
            let mut next = state.clone();
            next.phase = Phase::Idle;
            Ok(TransitionResult::new(next).with_effect(Effect::notify_user(RELAY_FAILURE_NOTICE)))
        }

        // ============================================================
        // Speech lifecycle
        // ============================================================
        (Phase::Listening, Event::StartListening) => Err(TransitionError::CaptureActive),

        (_, Event::StartListening) if !state.speech_supported => {
            Err(TransitionError::CaptureUnsupported)
        }

        (Phase::Idle, Event::StartListening) => {
            let mut next = state.clone();
            next.phase = Phase::Listening;
            Ok(TransitionResult::new(next).with_effect(Effect::StartCapture))
        }

        // Recognized text only fills the draft; submission stays manual.
        (Phase::Listening, Event::SpeechResult { transcript }) => {
            let mut next = state.clone();
            next.draft = transcript;
            next.phase = Phase::Idle;
            Ok(TransitionResult::new(next))
        }

        (Phase::Listening, Event::SpeechError { message: _ }) => {
            let mut next = state.clone();
            next.phase = Phase::Idle;
            Ok(TransitionResult::new(next).with_effect(Effect::notify_user(SPEECH_FAILURE_NOTICE)))
        }

        (Phase::Listening, Event::CaptureEnded) => {
            let mut next = state.clone();
            next.phase = Phase::Idle;
            Ok(TransitionResult::new(next))
        }

        // Providers emit a final end marker after delivering their result;
        // by then the session is already idle.
        (Phase::Idle, Event::CaptureEnded) => Ok(TransitionResult::new(state.clone())),

        // ============================================================
        // Invalid Transitions
        // ============================================================
        (phase, event) => Err(TransitionError::InvalidTransition(format!(
            "No transition from {phase:?} with event {event:?}"
        ))),
    }
}
