//! mosaic-api - HTTP API layer for the mosaic image service
//!
//! Exposes a single upload endpoint that stores an image, converts it to
//! grayscale and reports where the result was written.
//!
//! # Usage
//!
//! ```ignore
//! use mosaic_api::{create_router, AppState};
//! use mosaic_core::{ImageStore, StorageConfig};
//!
//! let store = ImageStore::open(StorageConfig::default())?;
//! let router = create_router(AppState::new(store));
//! ```

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the API router with the given application state
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = match state.body_limit() {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Grayscale conversion
        .route("/upload", post(handlers::upload::upload_image))
        // Middleware
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
