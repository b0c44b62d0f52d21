//! Admin service

use tracing::info;
use uuid::Uuid;

use crate::{
    config::LeaderboardConfig,
    constants::MAX_CHALLENGE_POINTS,
    db::Store,
    error::{AppError, AppResult},
    handlers::admin::request::{CreateBadgeRequest, CreateChallengeRequest},
    models::{Badge, BadgeRequirement, Challenge, Difficulty, NewBadge, NewChallenge},
    services::{BadgeCatalog, BadgeService},
    utils::{sanitize_string, validate_category, validate_challenge_title, validate_difficulty},
};

/// Admin service for catalog and score management
pub struct AdminService;

impl AdminService {
    /// Create a challenge
    pub async fn create_challenge(
        store: &dyn Store,
        admin_id: &Uuid,
        payload: CreateChallengeRequest,
    ) -> AppResult<Challenge> {
        let title = validate_challenge_title(&payload.title)
            .map_err(|e| AppError::Validation(e.to_string()))?;
        validate_category(&payload.category).map_err(|e| AppError::Validation(e.to_string()))?;
        validate_difficulty(&payload.difficulty)
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let difficulty = payload
            .difficulty
            .parse::<Difficulty>()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if payload.points < 0 {
            return Err(AppError::Validation("Points cannot be negative".to_string()));
        }
        if payload.points > MAX_CHALLENGE_POINTS {
            return Err(AppError::Validation(format!(
                "Points cannot exceed {}",
                MAX_CHALLENGE_POINTS
            )));
        }

        let challenge = store
            .create_challenge(&NewChallenge {
                title,
                description: payload.description,
                flag: payload.flag,
                points: payload.points,
                difficulty,
                category: payload.category,
            })
            .await?;

        info!(
            admin_id = %admin_id,
            challenge_id = %challenge.id,
            category = %challenge.category,
            difficulty = %challenge.difficulty,
            points = challenge.points,
            "Challenge created"
        );

        Ok(challenge)
    }

    /// Create a badge. The requirement must parse into a known rule.
    pub async fn create_badge(
        store: &dyn Store,
        admin_id: &Uuid,
        payload: CreateBadgeRequest,
    ) -> AppResult<Badge> {
        let requirement: BadgeRequirement = payload
            .requirement
            .parse()
            .map_err(|e| AppError::Validation(format!("Invalid badge requirement: {}", e)))?;

        let name = sanitize_string(&payload.name);
        if name.is_empty() {
            return Err(AppError::Validation("Badge name cannot be empty".to_string()));
        }

        let badge = store
            .create_badge(&NewBadge {
                name,
                description: payload.description,
                icon: payload.icon,
                requirement,
            })
            .await?;

        info!(
            admin_id = %admin_id,
            badge_id = %badge.id,
            badge = %badge.name,
            requirement = %badge.requirement,
            "Badge created"
        );

        Ok(badge)
    }

    /// Add points to a user's score and return the new score
    pub async fn adjust_points(
        store: &dyn Store,
        admin_id: &Uuid,
        user_id: &Uuid,
        points: i64,
        reason: Option<&str>,
    ) -> AppResult<i64> {
        if points < 1 {
            return Err(AppError::Validation(
                "Adjustment must be at least 1 point".to_string(),
            ));
        }

        let score = store.add_to_score(*user_id, points).await?;

        info!(
            admin_id = %admin_id,
            user_id = %user_id,
            points,
            new_score = score,
            reason = reason.unwrap_or(""),
            "Score adjusted"
        );

        Ok(score)
    }

    /// Re-run badge evaluation for a challenge the user has completed
    pub async fn reevaluate_badges(
        store: &dyn Store,
        catalog: &BadgeCatalog,
        user_id: &Uuid,
        challenge_id: &Uuid,
        config: &LeaderboardConfig,
    ) -> AppResult<Vec<Badge>> {
        BadgeService::evaluate(store, catalog, *user_id, *challenge_id, config).await
    }
}
