//! REST API routes.

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::{grid, map, request_id, scenarios, score};
use crate::config::Config;
use crate::state::AppState;

/// Create the API router with CORS, tracing and request ids applied.
pub fn create_router(config: &Config) -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/calculate_lri", post(score::calculate_lri))
        .route("/api/grid", post(grid::build_grid))
        .route("/api/map", get(map::get_map))
        .route("/api/scenarios/:name", get(scenarios::get_scenario))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id::ensure_request_id))
}

/// CORS policy from the configured origin set.
///
/// Credentials are allowed for explicit origins only; a `*` entry switches
/// to a credential-less wildcard policy.
pub fn cors_layer(config: &Config) -> CorsLayer {
    if config.allowed_origins.contains("*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let mut origins: Vec<HeaderValue> = Vec::with_capacity(config.allowed_origins.len());
    for origin in &config.allowed_origins {
        match HeaderValue::from_str(origin) {
            Ok(value) => origins.push(value),
            Err(_) => tracing::warn!("Ignoring invalid CORS origin '{}'", origin),
        }
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}
