//! WebSocket message types: client frames and the server envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ChatMessage, StationEvent};
use crate::error::RelayError;

/// Frame sent by a station client.
///
/// Adjacently tagged: `{"event": "chat", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientFrame {
    /// In-band re-affirmation of the connection's station.
    Connect {
        /// Station token the client claims.
        station: String,
    },
    /// Chat message to relay.
    Chat(ChatMessage),
}

impl ClientFrame {
    /// Decodes a text frame.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::MalformedMessage`] if the text is not JSON, names
    /// an unknown event, or lacks required fields.
    pub fn parse(text: &str) -> Result<Self, RelayError> {
        serde_json::from_str(text).map_err(|e| RelayError::MalformedMessage(e.to_string()))
    }
}

/// Server-to-client envelope: a [`StationEvent`] plus send timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct ServerMessage {
    /// Event discriminator and data, flattened into the envelope.
    #[serde(flatten)]
    pub event: StationEvent,
    /// ISO-8601 timestamp.
    pub timestamp: DateTime<Utc>,
}

impl ServerMessage {
    /// Wraps `event` with the current time.
    #[must_use]
    pub fn now(event: StationEvent) -> Self {
        Self {
            event,
            timestamp: Utc::now(),
        }
    }
}
