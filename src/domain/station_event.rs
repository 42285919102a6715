//! Chat payloads and the server-originated events pushed to a station's
//! connection.

use serde::{Deserialize, Serialize};

use super::{ConnectionId, StationId};

/// Event written to a connected station.
///
/// Serialized adjacently tagged: `{"event": "chat", "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum StationEvent {
    /// Binding accepted for this connection.
    Connected {
        /// Station the connection now holds.
        station: StationId,
        /// Server-assigned connection identifier.
        connection_id: ConnectionId,
    },
    /// Relayed chat payload, forwarded unmodified.
    Chat(serde_json::Value),
}

/// Addressed chat payload.
///
/// ```json
/// { "recipients": ["red-1", "blue-3"], "message": "Hey everybody!" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Station tokens to deliver to. Unknown tokens are skipped.
    pub recipients: Vec<String>,
    /// Opaque body, forwarded unmodified.
    pub message: serde_json::Value,
}
