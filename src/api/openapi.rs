//! OpenAPI document for the HTTP surface.

use utoipa::OpenApi;

use super::handlers::{stations, system, task};
use crate::domain::{StationId, StationStatus};
use crate::error::{ErrorBody, ErrorResponse};

/// Generated OpenAPI specification.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "station-relay",
        description = "Station registry and message relay for scouting stations."
    ),
    paths(
        stations::reset_handler,
        stations::stations_handler,
        system::health_handler,
        task::task_successes_handler,
    ),
    components(schemas(
        StationId,
        StationStatus,
        task::TaskSuccesses,
        system::HealthResponse,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "Stations", description = "Operator controls over station bindings"),
        (name = "System", description = "Service health"),
        (name = "Pages", description = "Page and widget helpers"),
    )
)]
pub struct ApiDoc;
