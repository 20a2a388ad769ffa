//! Session state types

use crate::transcript::Turn;

/// Turn-taking phase of the session.
///
/// `AwaitingReply` and `Listening` are mutually exclusive by construction;
/// both overlay `Idle` conceptually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Ready for user input, no pending operations
    #[default]
    Idle,
    /// A user turn has been submitted; its reply is outstanding
    AwaitingReply,
    /// Microphone capture is active
    Listening,
}

/// Full observable state of one conversation session.
///
/// Created empty at session start, mutated only through `transition`, and
/// discarded when the session ends. The transcript is append-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub transcript: Vec<Turn>,
    pub draft: String,
    pub phase: Phase,
    pub speech_supported: bool,
}

impl SessionState {
    pub fn new(speech_supported: bool) -> Self {
        Self {
            transcript: Vec::new(),
            draft: String::new(),
            phase: Phase::Idle,
            speech_supported,
        }
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.phase == Phase::AwaitingReply
    }

    pub fn is_listening(&self) -> bool {
        self.phase == Phase::Listening
    }
}
