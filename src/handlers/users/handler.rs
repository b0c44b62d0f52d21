//! User handler implementations

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    handlers::badges::response::BadgeResponse,
    services::{ProgressService, UserService},
    state::AppState,
};

use super::response::{MilestonesResponse, UserStatsResponse};

/// Get user statistics
pub async fn get_user_stats(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserStatsResponse>> {
    let stats = UserService::get_user_stats(state.store(), id, &state.config().leaderboard).await?;
    Ok(Json(stats))
}

/// Get badges held by a user
pub async fn get_user_badges(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<BadgeResponse>>> {
    let badges = UserService::get_user_badges(state.store(), id).await?;
    Ok(Json(badges))
}

/// Get milestone progress for a user
pub async fn get_user_milestones(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MilestonesResponse>> {
    let catalog = state.catalog().await;
    let milestones =
        ProgressService::get_milestones(state.store(), &catalog, id, &state.config().leaderboard)
            .await?;
    Ok(Json(milestones))
}
