//! banter - a minimal chat relay
//!
//! A single-endpoint relay server that forwards conversation transcripts to
//! an upstream completion API, plus the client-side conversation session
//! (transcript state machine, typed and spoken input) that talks to it.

pub mod api;
pub mod client;
pub mod config;
pub mod relay;
pub mod session;
pub mod speech;
pub mod transcript;
pub mod upstream;
