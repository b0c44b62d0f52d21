//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod admin;
pub mod badges;
pub mod challenges;
pub mod health;
pub mod leaderboard;
pub mod users;

use axum::{middleware, Router};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Create all API routes. Everything except the health check requires a
/// bearer token.
pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .nest("/challenges", challenges::routes())
        .nest("/leaderboard", leaderboard::routes())
        .nest("/users", users::routes())
        .nest("/badges", badges::routes())
        .nest("/admin", admin::routes())
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new().merge(health::routes()).merge(protected)
}
