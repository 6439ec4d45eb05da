//! Route definitions for the Recipe API
//!
//! This module organizes all API routes and applies middleware.

use crate::repositories::{Ingredients, Tags};
use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower::Layer;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    normalize_path::{NormalizePath, NormalizePathLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod attributes;
mod auth;
mod extract;
mod health;
mod recipes;


pub use attributes::attribute_routes;
pub use auth::auth_routes;
pub use recipes::recipe_routes;

/// The served application: the router behind trailing-slash normalization
pub type App = NormalizePath<Router>;

/// Create the main application router with all middleware
///
/// `/api/v1/ingredients/` and `/api/v1/ingredients` reach the same handler.
/// Normalization has to run before routing, so it wraps the finished router
/// instead of being added with `Router::layer`.
pub fn create_router(state: AppState) -> App {
    let router = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/api/v1", api_routes())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "Recipe App API v1" }))
        .nest("/auth", auth::auth_routes())
        .nest("/ingredients", attributes::attribute_routes::<Ingredients>())
        .nest("/tags", attributes::attribute_routes::<Tags>())
        .nest("/recipes", recipes::recipe_routes())
}
