//! User progress handlers

mod handler;
pub mod response;

pub use handler::*;
pub use response::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// User routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/{id}/stats", get(handler::get_user_stats))
        .route("/{id}/badges", get(handler::get_user_badges))
        .route("/{id}/milestones", get(handler::get_user_milestones))
}
