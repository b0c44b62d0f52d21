//! CTF Arena - scoring, badges and leaderboard backend
//!
//! This library provides the scoring engine for a capture-the-flag
//! platform: flag submissions with time bonuses, badge awards, the ranked
//! leaderboard and per-user milestone progress.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Store**: Database access behind one trait, PostgreSQL or MySQL
//! - **Models**: Domain models and badge rules

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_utils;

use std::time::Duration;

use axum::{http::StatusCode, middleware as axum_middleware, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;

/// Build the application router with all API routes mounted under the
/// versioned base path
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest(constants::API_BASE_PATH, handlers::routes(state.clone()))
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Router wrapped in the service-wide layers: body size limit, request
/// timeout, compression and CORS
pub fn create_app(state: AppState) -> Router {
    create_router(state)
        .layer(RequestBodyLimitLayer::new(constants::MAX_REQUEST_BODY_BYTES))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(constants::REQUEST_TIMEOUT_SECS),
        ))
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
