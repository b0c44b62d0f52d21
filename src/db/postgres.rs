//! PostgreSQL storage adapter

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::Store;
use crate::{
    error::{AppError, AppResult},
    models::{
        AwardedBadge, Badge, Challenge, CompletedChallenge, NewBadge, NewChallenge, NewCompletion,
        SolveGroup, SolveStats, User, UserStanding,
    },
};

/// `Store` backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn add_to_score(&self, user_id: Uuid, points: i64) -> AppResult<i64> {
        let score: Option<i64> = sqlx::query_scalar(
            r#"UPDATE users SET score = score + $2 WHERE id = $1 RETURNING score"#,
        )
        .bind(user_id)
        .bind(points)
        .fetch_optional(&self.pool)
        .await?;

        score.ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    async fn ranked_users(&self, limit: i64, include_banned: bool) -> AppResult<Vec<UserStanding>> {
        let standings = sqlx::query_as::<_, UserStanding>(
            r#"
            SELECT
                u.id AS user_id,
                u.username,
                u.score,
                (SELECT COUNT(*) FROM completed_challenges cc WHERE cc.user_id = u.id) AS solved_count
            FROM users u
            WHERE ($1 OR NOT u.is_banned)
            ORDER BY u.score DESC, u.id ASC
            LIMIT $2
            "#,
        )
        .bind(include_banned)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(standings)
    }

    async fn count_users_above(&self, score: i64, include_banned: bool) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM users WHERE score > $1 AND ($2 OR NOT is_banned)"#,
        )
        .bind(score)
        .bind(include_banned)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn find_challenge(&self, id: Uuid) -> AppResult<Option<Challenge>> {
        let challenge = sqlx::query_as::<_, Challenge>(r#"SELECT * FROM challenges WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(challenge)
    }

    async fn list_challenges(&self) -> AppResult<Vec<Challenge>> {
        let challenges = sqlx::query_as::<_, Challenge>(
            r#"SELECT * FROM challenges ORDER BY category, points, title"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(challenges)
    }

    async fn create_challenge(&self, challenge: &NewChallenge) -> AppResult<Challenge> {
        let created = sqlx::query_as::<_, Challenge>(
            r#"
            INSERT INTO challenges (id, title, description, flag, points, difficulty, category)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&challenge.title)
        .bind(&challenge.description)
        .bind(&challenge.flag)
        .bind(challenge.points)
        .bind(challenge.difficulty.as_str())
        .bind(&challenge.category)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn has_completed(&self, user_id: Uuid, challenge_id: Uuid) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM completed_challenges
                WHERE user_id = $1 AND challenge_id = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(challenge_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_completion(
        &self,
        user_id: Uuid,
        challenge_id: Uuid,
    ) -> AppResult<Option<CompletedChallenge>> {
        let completion = sqlx::query_as::<_, CompletedChallenge>(
            r#"SELECT * FROM completed_challenges WHERE user_id = $1 AND challenge_id = $2"#,
        )
        .bind(user_id)
        .bind(challenge_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(completion)
    }

    async fn record_completion(
        &self,
        completion: &NewCompletion,
    ) -> AppResult<Option<CompletedChallenge>> {
        let mut tx = self.pool.begin().await?;

        // Row lock on the challenge serializes concurrent first solves
        let solve_count: Option<i32> = sqlx::query_scalar(
            r#"UPDATE challenges SET solve_count = solve_count + 1 WHERE id = $1 RETURNING solve_count"#,
        )
        .bind(completion.challenge_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(solve_count) = solve_count else {
            return Err(AppError::NotFound("Challenge not found".to_string()));
        };

        let record = sqlx::query_as::<_, CompletedChallenge>(
            r#"
            INSERT INTO completed_challenges
                (id, user_id, challenge_id, time_to_solve, points_awarded, first_blood)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, challenge_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(completion.user_id)
        .bind(completion.challenge_id)
        .bind(completion.time_to_solve)
        .bind(completion.points_awarded)
        .bind(solve_count == 1)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(record) = record else {
            tx.rollback().await?;
            return Ok(None);
        };

        let updated = sqlx::query(r#"UPDATE users SET score = score + $2 WHERE id = $1"#)
            .bind(completion.user_id)
            .bind(i64::from(completion.points_awarded))
            .execute(&mut *tx)
            .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        tx.commit().await?;

        Ok(Some(record))
    }

    async fn solve_stats(&self, user_id: Uuid) -> AppResult<SolveStats> {
        let groups = sqlx::query_as::<_, SolveGroup>(
            r#"
            SELECT
                c.category,
                c.difficulty,
                COUNT(*) AS solves,
                COUNT(*) FILTER (WHERE cc.first_blood) AS first_bloods
            FROM completed_challenges cc
            JOIN challenges c ON c.id = cc.challenge_id
            WHERE cc.user_id = $1
            GROUP BY c.category, c.difficulty
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(groups.into_iter().collect())
    }

    async fn completion_times(&self, user_id: Uuid) -> AppResult<Vec<DateTime<Utc>>> {
        let times: Vec<DateTime<Utc>> = sqlx::query_scalar(
            r#"
            SELECT completed_at FROM completed_challenges
            WHERE user_id = $1
            ORDER BY completed_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(times)
    }

    async fn list_badges(&self) -> AppResult<Vec<Badge>> {
        let badges = sqlx::query_as::<_, Badge>(r#"SELECT * FROM badges ORDER BY created_at, name"#)
            .fetch_all(&self.pool)
            .await?;

        Ok(badges)
    }

    async fn create_badge(&self, badge: &NewBadge) -> AppResult<Badge> {
        let created = sqlx::query_as::<_, Badge>(
            r#"
            INSERT INTO badges (id, name, description, icon, requirement)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&badge.name)
        .bind(&badge.description)
        .bind(&badge.icon)
        .bind(badge.requirement.to_string())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn user_badges(&self, user_id: Uuid) -> AppResult<Vec<Badge>> {
        let badges = sqlx::query_as::<_, Badge>(
            r#"
            SELECT b.* FROM badges b
            JOIN user_badges ub ON ub.badge_id = b.id
            WHERE ub.user_id = $1
            ORDER BY ub.earned_at, b.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(badges)
    }

    async fn badges_for_users(&self, user_ids: &[Uuid]) -> AppResult<Vec<AwardedBadge>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let awarded = sqlx::query_as::<_, AwardedBadge>(
            r#"
            SELECT ub.user_id, b.* FROM user_badges ub
            JOIN badges b ON b.id = ub.badge_id
            WHERE ub.user_id = ANY($1)
            ORDER BY ub.earned_at, b.id
            "#,
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(awarded)
    }

    async fn award_badge(&self, user_id: Uuid, badge_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO user_badges (user_id, badge_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, badge_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(badge_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
