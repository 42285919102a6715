//! Application assembly: shared state, router, and middleware stack.

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::http::header::CACHE_CONTROL;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::AppState;
use crate::config::RelayConfig;
use crate::domain::StationRegistry;
use crate::service::StationService;
use crate::ws::handler::ws_handler;

/// `Cache-Control` value attached to every HTTP response.
pub const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

/// Builds the application state with every station unbound.
#[must_use]
pub fn build_state(config: &RelayConfig) -> AppState {
    let registry = Arc::new(StationRegistry::new());
    AppState {
        station_service: Arc::new(StationService::new(registry)),
        outbound_capacity: config.outbound_capacity,
    }
}

/// Builds the complete router: HTTP pages, operator endpoints, and `/ws`.
pub fn build_app(state: AppState, config: &RelayConfig) -> Router {
    let router = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::overriding(
                    CACHE_CONTROL,
                    HeaderValue::from_static(NO_CACHE),
                )),
        );

    let router = if config.cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}
