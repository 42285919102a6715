//! HTTP layer: route handlers, OpenAPI document, and router composition.

pub mod handlers;
pub mod openapi;

use axum::Router;

use crate::app_state::AppState;

/// Builds the router with every HTTP endpoint.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .merge(handlers::pages::routes())
        .merge(handlers::task::routes())
        .merge(handlers::stations::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
        )
    };

    router
}
