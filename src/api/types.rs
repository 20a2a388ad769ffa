//! API request and response types
//!
//! Shared by the server handlers and the HTTP relay client; both sides of
//! the exchange speak these shapes.

use crate::transcript::Turn;
use serde::{Deserialize, Serialize};

/// Request to relay a transcript
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<Turn>,
}

/// Successful relay response
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub content: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
