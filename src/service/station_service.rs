//! Station service: connection lifecycle orchestration.

use std::sync::Arc;

use super::relay::{DispatchReport, Relay};
use crate::domain::{
    BindDecision, ChatMessage, ConnectionHandle, ConnectionId, StationId, StationRegistry,
};

/// Close reason sent to every connection dropped by [`StationService::reset`].
pub const RESET_CLOSE_REASON: &str = "stations reset";

/// Orchestration layer for station connections.
///
/// Stateless coordinator: owns the [`StationRegistry`] and the [`Relay`]
/// built on it. Every lifecycle transition (bind, re-affirm, reject,
/// disconnect, reset) passes through here and is logged.
#[derive(Debug, Clone)]
pub struct StationService {
    registry: Arc<StationRegistry>,
    relay: Relay,
}

impl StationService {
    /// Creates a new `StationService`.
    #[must_use]
    pub fn new(registry: Arc<StationRegistry>) -> Self {
        let relay = Relay::new(Arc::clone(&registry));
        Self { registry, relay }
    }

    /// Returns a reference to the inner [`StationRegistry`].
    #[must_use]
    pub fn registry(&self) -> &Arc<StationRegistry> {
        &self.registry
    }

    /// Binds a connection to `station`.
    ///
    /// A [`BindDecision::Rejected`] result means the caller must close the
    /// connection; the incumbent binding is untouched.
    pub async fn connect(&self, station: StationId, handle: &ConnectionHandle) -> BindDecision {
        let decision = self.registry.bind(station, handle).await;
        match decision {
            BindDecision::Bound => {
                tracing::info!(%station, connection = %handle.id(), "station connected");
            }
            BindDecision::Reaffirmed => {
                tracing::info!(%station, connection = %handle.id(), "station re-connected");
            }
            BindDecision::Rejected => {
                tracing::warn!(
                    %station,
                    connection = %handle.id(),
                    "connection attempt rejected, station already occupied"
                );
            }
        }
        decision
    }

    /// Re-affirms the binding of an already running connection.
    ///
    /// Unlike [`connect`](Self::connect) this never binds an unbound station:
    /// a connection whose binding was cleared (by reset or stale-binding
    /// cleanup) gets [`BindDecision::Rejected`] and must close.
    pub async fn reaffirm(&self, station: StationId, handle: &ConnectionHandle) -> BindDecision {
        let decision = self.registry.reaffirm(station, handle).await;
        if decision.is_accepted() {
            tracing::info!(%station, connection = %handle.id(), "station re-connected");
        } else {
            tracing::warn!(
                %station,
                connection = %handle.id(),
                "re-connect refused, connection no longer holds station"
            );
        }
        decision
    }

    /// Relays a chat message to its recipients.
    pub async fn chat(&self, from: StationId, chat: &ChatMessage) -> DispatchReport {
        let report = self.relay.dispatch(&chat.recipients, &chat.message).await;
        tracing::info!(
            %from,
            chat = %serde_json::to_string(chat).unwrap_or_default(),
            delivered = report.delivered,
            skipped = report.skipped,
            failed = report.failed,
            "received chat"
        );
        report
    }

    /// Handles a transport-detected disconnect.
    ///
    /// Returns the station that was released, if the connection held one.
    pub async fn disconnect(&self, connection_id: ConnectionId) -> Option<StationId> {
        let released = self.registry.release_connection(connection_id).await;
        if let Some(station) = released {
            tracing::info!(%station, connection = %connection_id, "station disconnected");
        }
        released
    }

    /// Unbinds every station and closes every connection that held one.
    ///
    /// Returns the number of connections asked to close.
    pub async fn reset(&self) -> usize {
        let released = self.registry.unbind_all().await;
        let mut closed = 0;
        for (station, handle) in &released {
            if handle.close(RESET_CLOSE_REASON) {
                closed += 1;
            }
            tracing::debug!(%station, connection = %handle.id(), "station unbound by reset");
        }
        tracing::info!(unbound = released.len(), closed, "reset all stations");
        closed
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Outbound, StationEvent};

    fn service() -> StationService {
        StationService::new(Arc::new(StationRegistry::new()))
    }

    #[tokio::test]
    async fn connect_reject_disconnect_reconnect() {
        let svc = service();
        let (h1, _rx1) = ConnectionHandle::new(4);
        let (h2, _rx2) = ConnectionHandle::new(4);

        assert_eq!(svc.connect(StationId::Red1, &h1).await, BindDecision::Bound);
        assert_eq!(svc.connect(StationId::Red1, &h2).await, BindDecision::Rejected);

        // The rejected connection going away must not free the station.
        assert_eq!(svc.disconnect(h2.id()).await, None);
        assert_eq!(svc.registry().lookup(StationId::Red1).await, Some(h1.clone()));

        assert_eq!(svc.disconnect(h1.id()).await, Some(StationId::Red1));
        assert_eq!(svc.connect(StationId::Red1, &h2).await, BindDecision::Bound);
    }

    #[tokio::test]
    async fn reaffirm_after_reset_leaves_station_free() {
        let svc = service();
        let (old, _old_rx) = ConnectionHandle::new(4);
        let (fresh, _fresh_rx) = ConnectionHandle::new(4);

        assert_eq!(svc.connect(StationId::Red1, &old).await, BindDecision::Bound);
        assert_eq!(svc.reaffirm(StationId::Red1, &old).await, BindDecision::Reaffirmed);
        assert_eq!(svc.reset().await, 1);

        assert_eq!(svc.reaffirm(StationId::Red1, &old).await, BindDecision::Rejected);
        assert!(svc.registry().lookup(StationId::Red1).await.is_none());
        assert_eq!(svc.connect(StationId::Red1, &fresh).await, BindDecision::Bound);
    }

    #[tokio::test]
    async fn reset_closes_bound_connections() {
        let svc = service();
        let (h1, mut rx1) = ConnectionHandle::new(4);
        let (h2, mut rx2) = ConnectionHandle::new(4);
        svc.connect(StationId::Server, &h1).await;
        svc.connect(StationId::Blue2, &h2).await;

        assert_eq!(svc.reset().await, 2);
        assert_eq!(rx1.recv().await, Some(Outbound::Close(RESET_CLOSE_REASON)));
        assert_eq!(rx2.recv().await, Some(Outbound::Close(RESET_CLOSE_REASON)));
        assert_eq!(svc.registry().bound_count().await, 0);
    }

    #[tokio::test]
    async fn reset_on_empty_registry_succeeds() {
        let svc = service();
        assert_eq!(svc.reset().await, 0);
        assert_eq!(svc.registry().bound_count().await, 0);
    }

    #[tokio::test]
    async fn reset_skips_connections_already_gone() {
        let svc = service();
        let (h1, rx1) = ConnectionHandle::new(4);
        svc.connect(StationId::Red3, &h1).await;
        drop(rx1);

        assert_eq!(svc.reset().await, 0);
        assert!(svc.registry().lookup(StationId::Red3).await.is_none());
    }

    #[tokio::test]
    async fn chat_reaches_bound_recipient() {
        let svc = service();
        let (h1, mut rx1) = ConnectionHandle::new(4);
        svc.connect(StationId::Red1, &h1).await;

        let chat = ChatMessage {
            recipients: vec!["red-1".to_string(), "blue-3".to_string()],
            message: serde_json::json!("Hey everybody!"),
        };
        let report = svc.chat(StationId::Server, &chat).await;

        assert_eq!(report.delivered, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(
            rx1.recv().await,
            Some(Outbound::Event(StationEvent::Chat(serde_json::json!(
                "Hey everybody!"
            ))))
        );
    }
}
