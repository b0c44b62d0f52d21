//! Challenge handler implementations

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    services::{FlagSubmission, SubmissionService},
    state::AppState,
    utils::now_utc,
};

use super::{
    request::SubmitFlagRequest,
    response::{ChallengeResponse, SubmitFlagResponse},
};

/// List challenges
pub async fn list_challenges(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ChallengeResponse>>> {
    let challenges = state.store().list_challenges().await?;
    Ok(Json(
        challenges.into_iter().map(ChallengeResponse::from).collect(),
    ))
}

/// Get a challenge by ID
pub async fn get_challenge(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ChallengeResponse>> {
    let challenge = state
        .store()
        .find_challenge(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Challenge not found".to_string()))?;

    Ok(Json(challenge.into()))
}

/// Submit a flag for a challenge
///
/// Wrong and repeated submissions are reported in the body with
/// `success: false`, not as HTTP errors.
pub async fn submit_flag(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubmitFlagRequest>,
) -> AppResult<Json<SubmitFlagResponse>> {
    payload.validate()?;

    let catalog = state.catalog().await;
    let outcome = SubmissionService::submit(
        state.store(),
        &catalog,
        &state.config().leaderboard,
        FlagSubmission {
            user_id: auth_user.id,
            challenge_id: id,
            flag: payload.flag,
            start_time_ms: payload.start_time,
            submitted_at: now_utc(),
        },
    )
    .await?;

    Ok(Json(outcome.into()))
}
