//! HTTP API for the relay

mod handlers;
mod types;

pub use handlers::create_router;
pub use types::{ChatRequest, ChatResponse, ErrorResponse};

use crate::relay::RelayService;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<RelayService>,
}

impl AppState {
    pub fn new(relay: RelayService) -> Self {
        Self {
            relay: Arc::new(relay),
        }
    }
}
