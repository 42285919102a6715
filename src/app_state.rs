//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::StationService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Station service for all connection lifecycle logic.
    pub station_service: Arc<StationService>,
    /// Capacity of each connection's outbound queue.
    pub outbound_capacity: usize,
}
