//! Operator endpoints: reset and binding status.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::app_state::AppState;
use crate::domain::StationStatus;

/// Body returned by `GET /reset`.
pub const RESET_CONFIRMATION: &str = "Stations reset.";

/// `GET /reset` — Unbind every station and close every connection.
#[utoipa::path(
    get,
    path = "/reset",
    tag = "Stations",
    summary = "Reset all stations",
    description = "Clears every station binding and closes the connections that held them. Always succeeds.",
    responses(
        (status = 200, description = "Stations reset", body = String, content_type = "text/plain"),
    )
)]
pub async fn reset_handler(State(state): State<AppState>) -> &'static str {
    state.station_service.reset().await;
    RESET_CONFIRMATION
}

/// `GET /stations` — Binding state of every station.
#[utoipa::path(
    get,
    path = "/stations",
    tag = "Stations",
    summary = "List station bindings",
    description = "Returns each station identity with its current binding.",
    responses(
        (status = 200, description = "Station bindings", body = Vec<StationStatus>),
    )
)]
pub async fn stations_handler(State(state): State<AppState>) -> Json<Vec<StationStatus>> {
    Json(state.station_service.registry().snapshot().await)
}

/// Operator routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reset", get(reset_handler))
        .route("/stations", get(stations_handler))
}
