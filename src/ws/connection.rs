//! WebSocket connection state machine.
//!
//! Handles the bind handshake and the read/write loop for a single
//! WebSocket connection: inbound frames are decoded and dispatched, and
//! events queued on the connection's [`ConnectionHandle`] are written out.

use std::ops::ControlFlow;
use std::sync::Arc;

use axum::extract::ws::{CloseFrame, Message, Utf8Bytes, WebSocket, close_code};
use futures_util::{SinkExt, StreamExt};

use super::messages::{ClientFrame, ServerMessage};
use crate::domain::{ConnectionHandle, Outbound, StationEvent, StationId};
use crate::service::StationService;

/// Close reason sent when a station is already held by another connection.
pub const REJECT_CLOSE_REASON: &str = "station already connected";

/// Close reason sent when a running connection's binding has been cleared.
pub const UNBOUND_CLOSE_REASON: &str = "station no longer held";

/// Runs the lifecycle of one station connection.
///
/// - Binds the socket to `station`; a rejected bind closes it immediately.
/// - Reads client frames and dispatches them.
/// - Forwards queued [`Outbound`] items to the client.
/// - Releases the binding when the socket goes away.
pub async fn run_connection(
    socket: WebSocket,
    station: StationId,
    service: Arc<StationService>,
    outbound_capacity: usize,
) {
    let (handle, mut outbound_rx) = ConnectionHandle::new(outbound_capacity);
    let (mut ws_tx, mut ws_rx) = socket.split();

    if !service.connect(station, &handle).await.is_accepted() {
        let _ = ws_tx
            .send(close_message(close_code::POLICY, REJECT_CLOSE_REASON))
            .await;
        return;
    }

    let connected = StationEvent::Connected {
        station,
        connection_id: handle.id(),
    };
    if let Some(json) = encode(connected)
        && ws_tx.send(Message::text(json)).await.is_err()
    {
        service.disconnect(handle.id()).await;
        return;
    }

    loop {
        tokio::select! {
            // Incoming frame from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        if let ControlFlow::Break(reason) =
                            handle_text_message(text.as_str(), station, &handle, &service).await
                        {
                            let _ = ws_tx.send(close_message(close_code::POLICY, reason)).await;
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::debug!(%station, error = %e, "ws read failed");
                        break;
                    }
                    _ => {}
                }
            }
            // Queued by the relay or by reset
            out = outbound_rx.recv() => {
                match out {
                    Some(Outbound::Event(event)) => {
                        let Some(json) = encode(event) else {
                            continue;
                        };
                        if ws_tx.send(Message::text(json)).await.is_err() {
                            break;
                        }
                    }
                    Some(Outbound::Close(reason)) => {
                        let _ = ws_tx.send(close_message(close_code::NORMAL, reason)).await;
                        break;
                    }
                    None => break,
                }
            }
        }
    }

    service.disconnect(handle.id()).await;
    tracing::debug!(%station, connection = %handle.id(), "ws connection closed");
}

/// Handles a text frame from the client.
///
/// Returns [`ControlFlow::Break`] with a close reason if the connection no
/// longer holds its station. A socket whose binding was cleared by reset
/// cannot bind again in-band, nor keep relaying chat while its close is
/// pending.
async fn handle_text_message(
    text: &str,
    station: StationId,
    handle: &ConnectionHandle,
    service: &StationService,
) -> ControlFlow<&'static str> {
    let frame = match ClientFrame::parse(text) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::warn!(%station, error = %e, "dropping malformed frame");
            return ControlFlow::Continue(());
        }
    };

    match frame {
        ClientFrame::Chat(chat) => {
            if !service.registry().holds(station, handle.id()).await {
                tracing::warn!(
                    %station,
                    connection = %handle.id(),
                    "dropping chat from unbound connection"
                );
                return ControlFlow::Break(UNBOUND_CLOSE_REASON);
            }
            service.chat(station, &chat).await;
        }
        ClientFrame::Connect { station: claimed } => match claimed.parse::<StationId>() {
            Ok(claimed) if claimed == station => {
                if !service.reaffirm(station, handle).await.is_accepted() {
                    return ControlFlow::Break(UNBOUND_CLOSE_REASON);
                }
            }
            Ok(claimed) => {
                tracing::warn!(%station, %claimed, "ignoring connect for a different station");
            }
            Err(e) => {
                tracing::warn!(%station, error = %e, "ignoring connect for unknown station");
            }
        },
    }
    ControlFlow::Continue(())
}

fn encode(event: StationEvent) -> Option<String> {
    serde_json::to_string(&ServerMessage::now(event))
        .inspect_err(|e| tracing::error!(error = %e, "failed to encode station event"))
        .ok()
}

fn close_message(code: u16, reason: &'static str) -> Message {
    Message::Close(Some(CloseFrame {
        code,
        reason: Utf8Bytes::from_static(reason),
    }))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{BindDecision, StationRegistry};

    fn service() -> StationService {
        StationService::new(Arc::new(StationRegistry::new()))
    }

    const CONNECT_RED_1: &str = r#"{"event":"connect","data":{"station":"red-1"}}"#;

    #[tokio::test]
    async fn in_band_connect_reaffirms_live_binding() {
        let svc = service();
        let (handle, _rx) = ConnectionHandle::new(4);
        svc.connect(StationId::Red1, &handle).await;

        let flow = handle_text_message(CONNECT_RED_1, StationId::Red1, &handle, &svc).await;
        assert_eq!(flow, ControlFlow::Continue(()));
        assert_eq!(svc.registry().lookup(StationId::Red1).await, Some(handle));
    }

    #[tokio::test]
    async fn in_band_connect_after_reset_does_not_rebind() {
        let svc = service();
        let (old, mut old_rx) = ConnectionHandle::new(4);
        svc.connect(StationId::Red1, &old).await;
        assert_eq!(svc.reset().await, 1);

        let flow = handle_text_message(CONNECT_RED_1, StationId::Red1, &old, &svc).await;
        assert_eq!(flow, ControlFlow::Break(UNBOUND_CLOSE_REASON));
        assert!(svc.registry().lookup(StationId::Red1).await.is_none());
        assert_eq!(
            old_rx.recv().await,
            Some(Outbound::Close(crate::service::station_service::RESET_CLOSE_REASON))
        );

        let (fresh, _fresh_rx) = ConnectionHandle::new(4);
        assert_eq!(svc.connect(StationId::Red1, &fresh).await, BindDecision::Bound);
    }

    #[tokio::test]
    async fn chat_from_reset_connection_is_not_relayed() {
        let svc = service();
        let (old, _old_rx) = ConnectionHandle::new(4);
        let (listener, mut listener_rx) = ConnectionHandle::new(4);
        svc.connect(StationId::Blue1, &old).await;
        svc.reset().await;
        svc.connect(StationId::Server, &listener).await;

        let text = r#"{"event":"chat","data":{"recipients":["server"],"message":"late"}}"#;
        let flow = handle_text_message(text, StationId::Blue1, &old, &svc).await;
        assert_eq!(flow, ControlFlow::Break(UNBOUND_CLOSE_REASON));
        assert!(listener_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn malformed_frame_keeps_connection_open() {
        let svc = service();
        let (handle, _rx) = ConnectionHandle::new(4);
        svc.connect(StationId::Red2, &handle).await;

        let flow = handle_text_message("not json", StationId::Red2, &handle, &svc).await;
        assert_eq!(flow, ControlFlow::Continue(()));
    }
}
