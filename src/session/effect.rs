//! Effects produced by state transitions

use crate::transcript::Turn;
use std::time::Duration;

/// Effects to be executed after a state transition commits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Call the relay with the full updated transcript
    CallRelay { transcript: Vec<Turn> },

    /// Deliver a canned assistant reply after a fixed delay, bypassing the
    /// relay entirely
    ScheduleCannedReply { text: String, delay: Duration },

    /// Begin one microphone capture
    StartCapture,

    /// Surface a user-visible notification
    NotifyUser { message: String },
}

impl Effect {
    pub fn notify_user(message: impl Into<String>) -> Self {
        Effect::NotifyUser {
            message: message.into(),
        }
    }
}
