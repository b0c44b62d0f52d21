//! Storage contract
//!
//! Everything the scoring engine needs from persistence. Business logic only
//! ever sees `dyn Store`; the concrete backend is chosen at startup.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        AwardedBadge, Badge, Challenge, CompletedChallenge, NewBadge, NewChallenge, NewCompletion,
        SolveStats, User, UserStanding,
    },
};

/// Storage operations for users, challenges, badges, completions and awards.
///
/// Implementations must uphold:
/// - at most one completion per `(user_id, challenge_id)`, enforced by a
///   unique index;
/// - at most one award per `(user_id, badge_id)`, enforced by a unique index;
/// - relative (`x = x + n`) updates for `solve_count` and `score`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Store: Send + Sync {
    /// Round-trip to the backend, used by the health check
    async fn ping(&self) -> AppResult<()>;

    // ---------------------------------------------------------------------
    // Users
    // ---------------------------------------------------------------------

    async fn find_user(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Add a non-negative amount to a user's score, returning the new score.
    /// Fails with `NotFound` if the user does not exist.
    async fn add_to_score(&self, user_id: Uuid, points: i64) -> AppResult<i64>;

    /// Users ordered by score descending, then id ascending, capped at `limit`.
    async fn ranked_users(&self, limit: i64, include_banned: bool) -> AppResult<Vec<UserStanding>>;

    /// Number of ranked users with a score strictly greater than `score`.
    async fn count_users_above(&self, score: i64, include_banned: bool) -> AppResult<i64>;

    // ---------------------------------------------------------------------
    // Challenges
    // ---------------------------------------------------------------------

    async fn find_challenge(&self, id: Uuid) -> AppResult<Option<Challenge>>;

    async fn list_challenges(&self) -> AppResult<Vec<Challenge>>;

    async fn create_challenge(&self, challenge: &NewChallenge) -> AppResult<Challenge>;

    // ---------------------------------------------------------------------
    // Completions
    // ---------------------------------------------------------------------

    async fn has_completed(&self, user_id: Uuid, challenge_id: Uuid) -> AppResult<bool>;

    async fn find_completion(
        &self,
        user_id: Uuid,
        challenge_id: Uuid,
    ) -> AppResult<Option<CompletedChallenge>>;

    /// Atomically record a solve: increment the challenge's `solve_count`,
    /// insert the completion record (flagged as first blood when the new
    /// count is 1) and add `points_awarded` to the user's score.
    ///
    /// Returns `None`, with nothing changed, if the user already holds a
    /// completion record for the challenge.
    async fn record_completion(
        &self,
        completion: &NewCompletion,
    ) -> AppResult<Option<CompletedChallenge>>;

    /// Aggregate solve counters recomputed from completion records.
    async fn solve_stats(&self, user_id: Uuid) -> AppResult<SolveStats>;

    /// Completion timestamps for a user, most recent first.
    async fn completion_times(&self, user_id: Uuid) -> AppResult<Vec<DateTime<Utc>>>;

    // ---------------------------------------------------------------------
    // Badges
    // ---------------------------------------------------------------------

    async fn list_badges(&self) -> AppResult<Vec<Badge>>;

    async fn create_badge(&self, badge: &NewBadge) -> AppResult<Badge>;

    /// Badges held by a user, oldest award first.
    async fn user_badges(&self, user_id: Uuid) -> AppResult<Vec<Badge>>;

    /// Badges held by any of the given users.
    async fn badges_for_users(&self, user_ids: &[Uuid]) -> AppResult<Vec<AwardedBadge>>;

    /// Insert an award if absent. Returns `true` only when a row was created.
    async fn award_badge(&self, user_id: Uuid, badge_id: Uuid) -> AppResult<bool>;
}
