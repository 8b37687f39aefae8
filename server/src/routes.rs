//! Route table for the label service.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use crate::config::ServerConfig;
use crate::handlers;

/// Create the axum router with all routes.
pub fn create_router(config: ServerConfig) -> Router {
    Router::new()
        .route("/qr-gen", get(handlers::index))
        .route("/qr-gen/generate", post(handlers::generate))
        .route("/qr-gen/health", get(handlers::health))
        .layer(CorsLayer::permissive())
        .with_state(config)
}
