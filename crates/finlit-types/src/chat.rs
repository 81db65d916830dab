//! Chat record and relay payload types.
//!
//! A [`ChatRecord`] is one persisted message/response exchange. The payload
//! types mirror the JSON bodies of `POST /api/chat` and its replies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Upper bound on the number of records returned by a history listing.
pub const HISTORY_LIMIT: u32 = 50;

/// Apology text returned to the caller when the inference service fails.
pub const FALLBACK_RESPONSE: &str =
    "Sorry, I'm having trouble connecting to the AI right now. Please try again.";

/// Error text accompanying [`FALLBACK_RESPONSE`].
pub const FALLBACK_ERROR: &str = "AI service unavailable. Using fallback.";

/// Validation message for a missing or empty chat message.
pub const MESSAGE_REQUIRED: &str = "Message required";

/// A persisted message/response exchange.
///
/// Records are created once per successful relay and never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRecord {
    pub id: Uuid,
    pub message: String,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

/// Write-side input for a new chat record.
///
/// The store assigns the id, and the timestamp when none is given.
#[derive(Debug, Clone)]
pub struct NewChatRecord {
    pub message: String,
    pub response: String,
    pub timestamp: Option<DateTime<Utc>>,
}

impl NewChatRecord {
    pub fn new(message: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            response: response.into(),
            timestamp: None,
        }
    }

    /// Pin the creation time instead of letting the store stamp it.
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

impl ChatRequest {
    /// The message, if present and non-empty.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}

/// Successful relay reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// Reply sent when the inference service could not answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackReply {
    pub error: String,
    pub response: String,
}

impl Default for FallbackReply {
    fn default() -> Self {
        Self {
            error: FALLBACK_ERROR.to_string(),
            response: FALLBACK_RESPONSE.to_string(),
        }
    }
}
