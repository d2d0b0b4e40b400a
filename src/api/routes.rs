//! Router configuration for the API.
//!
//! Route registration, OpenAPI collection and middleware layering.

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers::{auth, games, genders, health, users};
use crate::api::middleware::{auth_middleware, logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Last added runs first:
/// 1. Request ID, so every log line and error body can carry it
/// 2. Logging
/// 3. CORS and compression
/// 4. Bearer auth, only on the protected half of each resource
pub fn create_router(state: AppState) -> Router {
    let protect = |routes: OpenApiRouter<AppState>| {
        routes.route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
    };

    let api = OpenApiRouter::new()
        .nest("/auth", auth::auth_routes())
        .nest(
            "/games",
            games::public_routes().merge(protect(games::protected_routes())),
        )
        .nest(
            "/genders",
            genders::public_routes().merge(protect(genders::protected_routes())),
        )
        .nest(
            "/users",
            users::public_routes().merge(protect(users::protected_routes())),
        );

    let (router, openapi) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(health::health_routes())
        .nest("/api", api)
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
