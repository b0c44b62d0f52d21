//! Badge handler implementations

use axum::{extract::State, Json};

use crate::{error::AppResult, state::AppState};

use super::response::BadgeResponse;

/// List the full badge catalog, including badges whose rule is not
/// currently evaluated
pub async fn list_badges(State(state): State<AppState>) -> AppResult<Json<Vec<BadgeResponse>>> {
    let badges = state.store().list_badges().await?;
    Ok(Json(badges.into_iter().map(BadgeResponse::from).collect()))
}
