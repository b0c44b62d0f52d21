//! MySQL storage adapter
//!
//! MySQL has no `RETURNING` and no `ON CONFLICT`; ids are generated here and
//! rows re-read inside the same transaction, and duplicate inserts are
//! detected through the unique-violation error.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use super::{is_unique_violation, Store};
use crate::{
    error::{AppError, AppResult},
    models::{
        AwardedBadge, Badge, Challenge, CompletedChallenge, NewBadge, NewChallenge, NewCompletion,
        SolveGroup, SolveStats, User, UserStanding,
    },
};

/// `Store` backed by a MySQL pool
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for MySqlStore {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE id = ?"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn add_to_score(&self, user_id: Uuid, points: i64) -> AppResult<i64> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(r#"UPDATE users SET score = score + ? WHERE id = ?"#)
            .bind(points)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let score: Option<i64> = sqlx::query_scalar(r#"SELECT score FROM users WHERE id = ?"#)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;

        let score = score.ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        tx.commit().await?;

        Ok(score)
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
            WHERE (? OR u.is_banned = FALSE)
            ORDER BY u.score DESC, u.id ASC
            LIMIT ?
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
            r#"SELECT COUNT(*) FROM users WHERE score > ? AND (? OR is_banned = FALSE)"#,
        )
        .bind(score)
        .bind(include_banned)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn find_challenge(&self, id: Uuid) -> AppResult<Option<Challenge>> {
        let challenge = sqlx::query_as::<_, Challenge>(r#"SELECT * FROM challenges WHERE id = ?"#)
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
        let id = Uuid::new_v4();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO challenges (id, title, description, flag, points, difficulty, category)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(&challenge.title)
        .bind(&challenge.description)
        .bind(&challenge.flag)
        .bind(challenge.points)
        .bind(challenge.difficulty.as_str())
        .bind(&challenge.category)
        .execute(&mut *tx)
        .await?;

        let created = sqlx::query_as::<_, Challenge>(r#"SELECT * FROM challenges WHERE id = ?"#)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn has_completed(&self, user_id: Uuid, challenge_id: Uuid) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM completed_challenges
                WHERE user_id = ? AND challenge_id = ?
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
            r#"SELECT * FROM completed_challenges WHERE user_id = ? AND challenge_id = ?"#,
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

        let updated = sqlx::query(r#"UPDATE challenges SET solve_count = solve_count + 1 WHERE id = ?"#)
            .bind(completion.challenge_id)
            .execute(&mut *tx)
            .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound("Challenge not found".to_string()));
        }

        // The update above holds the row lock, so this read sees our increment
        let solve_count: i32 = sqlx::query_scalar(r#"SELECT solve_count FROM challenges WHERE id = ?"#)
            .bind(completion.challenge_id)
            .fetch_one(&mut *tx)
            .await?;

        let id = Uuid::new_v4();
        let inserted = sqlx::query(
            r#"
            INSERT INTO completed_challenges
                (id, user_id, challenge_id, time_to_solve, points_awarded, first_blood)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(completion.user_id)
        .bind(completion.challenge_id)
        .bind(completion.time_to_solve)
        .bind(completion.points_awarded)
        .bind(solve_count == 1)
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {}
            Err(err) if is_unique_violation(&err) => {
                tx.rollback().await?;
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        }

        let updated = sqlx::query(r#"UPDATE users SET score = score + ? WHERE id = ?"#)
            .bind(i64::from(completion.points_awarded))
            .bind(completion.user_id)
            .execute(&mut *tx)
            .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let record = sqlx::query_as::<_, CompletedChallenge>(
            r#"SELECT * FROM completed_challenges WHERE id = ?"#,
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

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
                CAST(SUM(CASE WHEN cc.first_blood THEN 1 ELSE 0 END) AS SIGNED) AS first_bloods
            FROM completed_challenges cc
            JOIN challenges c ON c.id = cc.challenge_id
            WHERE cc.user_id = ?
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
            WHERE user_id = ?
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
        let id = Uuid::new_v4();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO badges (id, name, description, icon, requirement)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(&badge.name)
        .bind(&badge.description)
        .bind(&badge.icon)
        .bind(badge.requirement.to_string())
        .execute(&mut *tx)
        .await?;

        let created = sqlx::query_as::<_, Badge>(r#"SELECT * FROM badges WHERE id = ?"#)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn user_badges(&self, user_id: Uuid) -> AppResult<Vec<Badge>> {
        let badges = sqlx::query_as::<_, Badge>(
            r#"
            SELECT b.* FROM badges b
            JOIN user_badges ub ON ub.badge_id = b.id
            WHERE ub.user_id = ?
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

        let mut query: QueryBuilder<MySql> = QueryBuilder::new(
            "SELECT ub.user_id, b.* FROM user_badges ub \
             JOIN badges b ON b.id = ub.badge_id \
             WHERE ub.user_id IN (",
        );
        let mut ids = query.separated(", ");
        for id in user_ids {
            ids.push_bind(*id);
        }
        ids.push_unseparated(") ORDER BY ub.earned_at, b.id");

        let awarded = query
            .build_query_as::<AwardedBadge>()
            .fetch_all(&self.pool)
            .await?;

        Ok(awarded)
    }

    async fn award_badge(&self, user_id: Uuid, badge_id: Uuid) -> AppResult<bool> {
        let inserted = sqlx::query(r#"INSERT INTO user_badges (user_id, badge_id) VALUES (?, ?)"#)
            .bind(user_id)
            .bind(badge_id)
            .execute(&self.pool)
            .await;

        match inserted {
            Ok(result) => Ok(result.rows_affected() == 1),
            Err(err) if is_unique_violation(&err) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}
