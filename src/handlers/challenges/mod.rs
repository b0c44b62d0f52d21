//! Challenge handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Challenge routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_challenges))
        .route("/{id}", get(handler::get_challenge))
        .route("/{id}/submit", post(handler::submit_flag))
}
