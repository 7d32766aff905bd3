//! Chat data types shared with the HTTP layer.

use serde::{Deserialize, Serialize};

/// One conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "user" or "assistant".
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".into(), content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: "assistant".into(), content: content.into() }
    }
}

/// Rule-based personalization attached to every reply.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Personalization {
    pub urgent: bool,
    pub recommended_diet: Vec<String>,
}
