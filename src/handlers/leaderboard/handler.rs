//! Leaderboard handler implementations

use axum::{extract::State, Json};

use crate::{error::AppResult, services::LeaderboardService, state::AppState};

use super::response::LeaderboardEntry;

/// Get the ranked leaderboard
pub async fn get_leaderboard(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<LeaderboardEntry>>> {
    let entries =
        LeaderboardService::get_leaderboard(state.store(), &state.config().leaderboard).await?;
    Ok(Json(entries))
}
