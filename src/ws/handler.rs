//! Axum WebSocket upgrade handler.

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;

use super::connection::run_connection;
use crate::app_state::AppState;
use crate::domain::StationId;
use crate::error::RelayError;

/// Query parameters carried by the connect request.
#[derive(Debug, Deserialize)]
pub struct ConnectParams {
    /// Station token the client wants to hold.
    pub station: String,
}

/// `GET /ws?station=<token>` — Upgrade HTTP connection to WebSocket.
///
/// # Errors
///
/// Returns [`RelayError::UnknownStation`] before upgrading if the token is
/// not a station identity.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<ConnectParams>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, RelayError> {
    let station: StationId = params.station.parse()?;
    let service = std::sync::Arc::clone(&state.station_service);
    let capacity = state.outbound_capacity;

    Ok(ws.on_upgrade(move |socket| run_connection(socket, station, service, capacity)))
}
