//! Admin handler implementations

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::roles,
    error::{AppError, AppResult},
    handlers::badges::response::BadgeResponse,
    middleware::auth::AuthenticatedUser,
    services::AdminService,
    state::AppState,
};

use super::{
    request::{AdjustPointsRequest, CreateBadgeRequest, CreateChallengeRequest, EvaluateBadgesRequest},
    response::{AdminChallengeResponse, EvaluateBadgesResponse, PointsAdjustedResponse},
};

/// Verify user is admin
fn require_admin(auth_user: &AuthenticatedUser) -> AppResult<()> {
    if auth_user.role != roles::ADMIN {
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }
    Ok(())
}

/// Create a challenge
pub async fn create_challenge(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateChallengeRequest>,
) -> AppResult<(StatusCode, Json<AdminChallengeResponse>)> {
    require_admin(&auth_user)?;
    payload.validate()?;

    let challenge = AdminService::create_challenge(state.store(), &auth_user.id, payload).await?;

    Ok((StatusCode::CREATED, Json(challenge.into())))
}

/// Create a badge and refresh the in-memory catalog
pub async fn create_badge(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateBadgeRequest>,
) -> AppResult<(StatusCode, Json<BadgeResponse>)> {
    require_admin(&auth_user)?;
    payload.validate()?;

    let badge = AdminService::create_badge(state.store(), &auth_user.id, payload).await?;
    state.reload_catalog().await?;

    Ok((StatusCode::CREATED, Json(badge.into())))
}

/// Add points to a user's score
pub async fn adjust_points(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AdjustPointsRequest>,
) -> AppResult<Json<PointsAdjustedResponse>> {
    require_admin(&auth_user)?;
    payload.validate()?;

    let score = AdminService::adjust_points(
        state.store(),
        &auth_user.id,
        &id,
        payload.points,
        payload.reason.as_deref(),
    )
    .await?;

    Ok(Json(PointsAdjustedResponse { user_id: id, score }))
}

/// Re-run badge evaluation for a completed challenge
pub async fn evaluate_badges(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<EvaluateBadgesRequest>,
) -> AppResult<Json<EvaluateBadgesResponse>> {
    require_admin(&auth_user)?;

    let catalog = state.catalog().await;
    let badges = AdminService::reevaluate_badges(
        state.store(),
        &catalog,
        &id,
        &payload.challenge_id,
        &state.config().leaderboard,
    )
    .await?;

    Ok(Json(EvaluateBadgesResponse {
        new_badges: badges.into_iter().map(BadgeResponse::from).collect(),
    }))
}
