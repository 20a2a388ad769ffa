//! Client-side conversation session
//!
//! Implements the Elm Architecture pattern with pure state transitions: the
//! transcript state machine lives in `transition`, and the async runtime
//! executes the effects it emits (relay calls, the demo timer, speech
//! capture) while broadcasting state snapshots to observers.

mod effect;
pub mod event;
mod runtime;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;
#[cfg(test)]
pub mod testing;

pub use effect::Effect;
pub use event::Event;
pub use runtime::{SessionClosed, SessionHandle, SessionRuntime, SessionSignal};
pub use state::{Phase, SessionState};
pub use transition::{transition, TransitionError, TransitionResult};

use std::time::Duration;

/// Canned reply for the demo bypass
pub const DEMO_REPLY: &str = "This is a demo response. In a real application, \
this could be a pre-defined message or a complex interaction flow.";

/// Simulated latency before the canned demo reply lands
pub const DEMO_REPLY_DELAY: Duration = Duration::from_millis(1000);
