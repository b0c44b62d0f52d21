//! Flag submission service
//!
//! A correct first submission is recorded in a single storage transaction
//! (solve count, completion record, score). Badge evaluation runs after the
//! commit and can never fail the submission.

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    config::LeaderboardConfig,
    constants::TIME_BONUS_BRACKETS,
    db::Store,
    error::{AppError, AppResult},
    models::{Badge, NewCompletion},
    services::{BadgeCatalog, BadgeService},
    utils::elapsed_seconds,
};

/// A flag submitted by a user
#[derive(Debug, Clone)]
pub struct FlagSubmission {
    pub user_id: Uuid,
    pub challenge_id: Uuid,
    pub flag: String,
    /// Client-reported start of the attempt, epoch milliseconds
    pub start_time_ms: Option<i64>,
    pub submitted_at: DateTime<Utc>,
}

/// Points and badges earned by a correct submission
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub base_points: i32,
    pub bonus_points: i32,
    pub points_awarded: i32,
    /// `None` when badge evaluation failed
    pub new_badges: Option<Vec<Badge>>,
}

/// Result of a submission that did not error
#[derive(Debug, Clone)]
pub enum SubmissionOutcome {
    Solved(SolveResult),
    IncorrectFlag,
    AlreadyCompleted,
}

/// Bonus points for solving within a time bracket, rounded down.
pub fn time_bonus(base: i32, elapsed_secs: Option<i64>) -> i32 {
    let Some(elapsed) = elapsed_secs else {
        return 0;
    };

    TIME_BONUS_BRACKETS
        .iter()
        .find(|(under, _)| elapsed < *under)
        .map(|(_, percent)| (i64::from(base) * percent / 100) as i32)
        .unwrap_or(0)
}

/// Submission service for business logic
pub struct SubmissionService;

impl SubmissionService {
    /// Check a flag and, when it is the user's first correct submission for
    /// the challenge, record the solve and evaluate badges.
    pub async fn submit(
        store: &dyn Store,
        catalog: &BadgeCatalog,
        config: &LeaderboardConfig,
        submission: FlagSubmission,
    ) -> AppResult<SubmissionOutcome> {
        let challenge = store
            .find_challenge(submission.challenge_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Challenge not found".to_string()))?;

        let user = store
            .find_user(submission.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if user.is_banned {
            return Err(AppError::Forbidden(
                "Banned users cannot submit flags".to_string(),
            ));
        }

        if store.has_completed(user.id, challenge.id).await? {
            return Ok(SubmissionOutcome::AlreadyCompleted);
        }

        if !challenge.flag_matches(&submission.flag) {
            info!(
                user_id = %user.id,
                challenge_id = %challenge.id,
                "Incorrect flag submitted"
            );
            return Ok(SubmissionOutcome::IncorrectFlag);
        }

        let elapsed = submission
            .start_time_ms
            .and_then(|start| elapsed_seconds(start, submission.submitted_at));

        let base_points = challenge.points;
        let bonus_points = time_bonus(base_points, elapsed);
        let points_awarded = base_points.checked_add(bonus_points).ok_or_else(|| {
            AppError::Internal(anyhow!(
                "points overflow for challenge {} ({} base, {} bonus)",
                challenge.id,
                base_points,
                bonus_points
            ))
        })?;

        let completion = store
            .record_completion(&NewCompletion {
                user_id: user.id,
                challenge_id: challenge.id,
                time_to_solve: elapsed,
                points_awarded,
            })
            .await?;

        // Lost a race against a concurrent correct submission
        let Some(completion) = completion else {
            return Ok(SubmissionOutcome::AlreadyCompleted);
        };

        info!(
            user_id = %user.id,
            challenge_id = %challenge.id,
            points = points_awarded,
            base_points,
            bonus_points,
            first_blood = completion.first_blood,
            "Challenge solved"
        );

        let new_badges =
            match BadgeService::evaluate(store, catalog, user.id, challenge.id, config).await {
                Ok(badges) => Some(badges),
                Err(e) => {
                    error!(
                        user_id = %user.id,
                        challenge_id = %challenge.id,
                        error = %e,
                        "Badge evaluation failed"
                    );
                    None
                }
            };

        Ok(SubmissionOutcome::Solved(SolveResult {
            base_points,
            bonus_points,
            points_awarded,
            new_badges,
        }))
    }
}
