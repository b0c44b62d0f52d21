//! Admin console handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{routing::post, Router};

use crate::state::AppState;

/// Admin routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/challenges", post(handler::create_challenge))
        .route("/badges", post(handler::create_badge))
        .route("/users/{id}/points", post(handler::adjust_points))
        .route("/users/{id}/badges/evaluate", post(handler::evaluate_badges))
}
