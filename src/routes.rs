//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /`                  - Shorten a URL, plain-text body
//! - `GET  /{code}`            - Redirect to the original URL
//! - `GET  /ping`              - Storage health check
//! - `POST /api/shorten`       - Shorten a URL, JSON
//! - `POST /api/shorten/batch` - Shorten many URLs at once
//! - `GET  /api/user/urls`     - List the calling identity's URLs
//!
//! # Middleware
//!
//! - **Identity** - Signed anonymous identity cookie, minted on demand
//! - **Tracing** - Structured request/response logging
//! - **Compression** - Gzip on responses, transparent gzip on request bodies

use axum::routing::{get, post};
use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::decompression::RequestDecompressionLayer;

use crate::api::handlers::{
    batch_shorten_handler, ping_handler, redirect_handler, shorten_handler, shorten_text_handler,
    user_urls_handler,
};
use crate::api::middleware::{identity, trace};
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(shorten_text_handler))
        .route("/{code}", get(redirect_handler))
        .route("/ping", get(ping_handler))
        .route("/api/shorten", post(shorten_handler))
        .route("/api/shorten/batch", post(batch_shorten_handler))
        .route("/api/user/urls", get(user_urls_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            identity::layer,
        ))
        .layer(trace::layer())
        .layer(CompressionLayer::new())
        .layer(RequestDecompressionLayer::new())
        .with_state(state)
}
