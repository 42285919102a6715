//! Live connection handles.
//!
//! A [`ConnectionHandle`] is the registry's view of one WebSocket: an
//! identifier plus the sending half of that socket's outbound queue. Two
//! handles are equal only if they refer to the same physical connection.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use super::StationEvent;
use crate::error::DeliveryError;

/// Unique identifier for one live connection.
///
/// Wraps a UUID v4 generated when the socket is upgraded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(uuid::Uuid);

impl ConnectionId {
    /// Creates a new random `ConnectionId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Item queued for a connection's writer task.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    /// Serialize and send an event frame.
    Event(StationEvent),
    /// Send a close frame with the given reason and stop.
    Close(&'static str),
}

/// Opaque, comparable handle to one live connection.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: ConnectionId,
    outbound: mpsc::Sender<Outbound>,
}

impl ConnectionHandle {
    /// Creates a handle and the receiving end of its outbound queue.
    #[must_use]
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<Outbound>) {
        let (outbound, rx) = mpsc::channel(capacity.max(1));
        let handle = Self {
            id: ConnectionId::new(),
            outbound,
        };
        (handle, rx)
    }

    /// Returns this connection's identifier.
    #[must_use]
    pub const fn id(&self) -> ConnectionId {
        self.id
    }

    /// Queues an event without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::Closed`] if the connection task has exited,
    /// or [`DeliveryError::Full`] if its queue has no free capacity.
    pub fn deliver(&self, event: StationEvent) -> Result<(), DeliveryError> {
        self.outbound
            .try_send(Outbound::Event(event))
            .map_err(|e| match e {
                TrySendError::Full(_) => DeliveryError::Full,
                TrySendError::Closed(_) => DeliveryError::Closed,
            })
    }

    /// Asks the connection task to close the socket.
    ///
    /// Returns `false` if the connection was already gone.
    pub fn close(&self, reason: &'static str) -> bool {
        match self.outbound.try_send(Outbound::Close(reason)) {
            Ok(()) => true,
            // Queue backed up: close from a task once there is room.
            Err(TrySendError::Full(item)) => {
                let outbound = self.outbound.clone();
                tokio::spawn(async move {
                    let _ = outbound.send(item).await;
                });
                true
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }
}

impl PartialEq for ConnectionHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ConnectionHandle {}

impl Hash for ConnectionHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique() {
        let (a, _rx_a) = ConnectionHandle::new(4);
        let (b, _rx_b) = ConnectionHandle::new(4);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[tokio::test]
    async fn deliver_queues_event() {
        let (handle, mut rx) = ConnectionHandle::new(4);
        let event = StationEvent::Chat(serde_json::json!("hi"));
        assert!(handle.deliver(event.clone()).is_ok());
        assert_eq!(rx.recv().await, Some(Outbound::Event(event)));
    }

    #[test]
    fn deliver_reports_closed() {
        let (handle, rx) = ConnectionHandle::new(4);
        drop(rx);
        assert_eq!(
            handle.deliver(StationEvent::Chat(serde_json::Value::Null)),
            Err(DeliveryError::Closed)
        );
        assert!(!handle.close("bye"));
    }

    #[test]
    fn deliver_reports_full() {
        let (handle, _rx) = ConnectionHandle::new(1);
        assert!(handle.deliver(StationEvent::Chat(serde_json::json!(1))).is_ok());
        assert_eq!(
            handle.deliver(StationEvent::Chat(serde_json::json!(2))),
            Err(DeliveryError::Full)
        );
    }

    #[tokio::test]
    async fn close_request_is_queued() {
        let (handle, mut rx) = ConnectionHandle::new(4);
        assert!(handle.close("stations reset"));
        assert_eq!(rx.recv().await, Some(Outbound::Close("stations reset")));
    }

    #[test]
    fn display_is_uuid_format() {
        let id = ConnectionId::new();
        assert_eq!(id.to_string().len(), 36);
    }
}
