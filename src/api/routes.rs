//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use std::time::Duration;

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{
    envelope_fallback_errors, logging_middleware, request_id_middleware, timeout_middleware,
};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. Request ID - generates/propagates request IDs
/// 2. Logging - opens the request span with that ID
/// 3. Error fallback - wraps non-JSON error responses in the envelope
/// 4. Timeout - answers 408 after `request_timeout`
///
/// # Routes
/// - `/api/podcasts` - Podcasts, episodes and reviews
/// - `/api/accounts` - Accounts, login, subscriptions
/// - `/api/health` - Health checks
/// - `/swagger-ui` - API documentation
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let (api_router, openapi) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest(
            "/api/podcasts",
            handlers::podcasts::podcast_routes(state.clone()),
        )
        .nest(
            "/api/accounts",
            handlers::accounts::account_routes(state.clone()),
        )
        .nest("/api/health", handlers::health::health_routes())
        .split_for_parts();

    api_router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .layer(middleware::from_fn_with_state(
            request_timeout,
            timeout_middleware,
        ))
        .layer(middleware::from_fn(envelope_fallback_errors))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
