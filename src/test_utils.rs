//! Test utilities
//!
//! An in-memory `Store` with the same observable semantics as the SQL
//! backends, plus helpers to mint tokens and build a router around it.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use axum::Router;
use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

use crate::{
    config::{Config, DatabaseConfig, DatabaseKind, JwtConfig, LeaderboardConfig, ServerConfig},
    constants::roles,
    db::Store,
    error::{AppError, AppResult},
    models::{
        AwardedBadge, Badge, Challenge, CompletedChallenge, Difficulty, NewBadge, NewChallenge,
        NewCompletion, SolveGroup, SolveStats, User, UserStanding,
    },
    services::{auth_service::Claims, BadgeCatalog},
    state::AppState,
};

pub const TEST_JWT_SECRET: &str = "test-secret";

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    challenges: Vec<Challenge>,
    completions: Vec<CompletedChallenge>,
    badges: Vec<Badge>,
    /// `(user_id, badge_id)` in award order
    awards: Vec<(Uuid, Uuid)>,
}

/// In-memory storage backend
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    pub fn add_user(&self, username: &str, score: i64) -> Uuid {
        self.add_user_with_role(username, roles::USER, score)
    }

    pub fn add_user_with_role(&self, username: &str, role: &str, score: i64) -> Uuid {
        let id = Uuid::new_v4();
        self.tables().users.push(User {
            id,
            username: username.to_string(),
            role: role.to_string(),
            is_banned: false,
            score,
            created_at: Utc::now(),
        });
        id
    }

    pub fn ban_user(&self, id: Uuid) {
        if let Some(user) = self.tables().users.iter_mut().find(|u| u.id == id) {
            user.is_banned = true;
        }
    }

    pub fn add_challenge(
        &self,
        title: &str,
        flag: &str,
        points: i32,
        difficulty: Difficulty,
        category: &str,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.tables().challenges.push(Challenge {
            id,
            title: title.to_string(),
            description: String::new(),
            flag: flag.to_string(),
            points,
            difficulty,
            category: category.to_string(),
            solve_count: 0,
            created_at: Utc::now(),
        });
        id
    }

    /// Insert a catalog row without parsing the requirement
    pub fn add_badge(&self, name: &str, requirement: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.tables().badges.push(Badge {
            id,
            name: name.to_string(),
            description: format!("Requires {}", requirement),
            icon: None,
            requirement: requirement.to_string(),
            created_at: Utc::now(),
        });
        id
    }

    pub fn all_badges(&self) -> Vec<Badge> {
        self.tables().badges.clone()
    }
}

fn ranked(user: &User, include_banned: bool) -> bool {
    include_banned || !user.is_banned
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.tables().users.iter().find(|u| u.id == id).cloned())
    }

    async fn add_to_score(&self, user_id: Uuid, points: i64) -> AppResult<i64> {
        let mut tables = self.tables();
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        user.score += points;
        Ok(user.score)
    }

    async fn ranked_users(&self, limit: i64, include_banned: bool) -> AppResult<Vec<UserStanding>> {
        let tables = self.tables();
        let mut standings: Vec<UserStanding> = tables
            .users
            .iter()
            .filter(|u| ranked(u, include_banned))
            .map(|u| UserStanding {
                user_id: u.id,
                username: u.username.clone(),
                score: u.score,
                solved_count: tables
                    .completions
                    .iter()
                    .filter(|c| c.user_id == u.id)
                    .count() as i64,
            })
            .collect();

        standings.sort_by(|a, b| b.score.cmp(&a.score).then(a.user_id.cmp(&b.user_id)));
        standings.truncate(limit.max(0) as usize);
        Ok(standings)
    }

    async fn count_users_above(&self, score: i64, include_banned: bool) -> AppResult<i64> {
        Ok(self
            .tables()
            .users
            .iter()
            .filter(|u| ranked(u, include_banned) && u.score > score)
            .count() as i64)
    }

    async fn find_challenge(&self, id: Uuid) -> AppResult<Option<Challenge>> {
        Ok(self.tables().challenges.iter().find(|c| c.id == id).cloned())
    }

    async fn list_challenges(&self) -> AppResult<Vec<Challenge>> {
        let mut challenges = self.tables().challenges.clone();
        challenges.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then(a.points.cmp(&b.points))
                .then(a.title.cmp(&b.title))
        });
        Ok(challenges)
    }

    async fn create_challenge(&self, challenge: &NewChallenge) -> AppResult<Challenge> {
        let created = Challenge {
            id: Uuid::new_v4(),
            title: challenge.title.clone(),
            description: challenge.description.clone(),
            flag: challenge.flag.clone(),
            points: challenge.points,
            difficulty: challenge.difficulty,
            category: challenge.category.clone(),
            solve_count: 0,
            created_at: Utc::now(),
        };
        self.tables().challenges.push(created.clone());
        Ok(created)
    }

    async fn has_completed(&self, user_id: Uuid, challenge_id: Uuid) -> AppResult<bool> {
        Ok(self
            .tables()
            .completions
            .iter()
            .any(|c| c.user_id == user_id && c.challenge_id == challenge_id))
    }

    async fn find_completion(
        &self,
        user_id: Uuid,
        challenge_id: Uuid,
    ) -> AppResult<Option<CompletedChallenge>> {
        Ok(self
            .tables()
            .completions
            .iter()
            .find(|c| c.user_id == user_id && c.challenge_id == challenge_id)
            .cloned())
    }

    async fn record_completion(
        &self,
        completion: &NewCompletion,
    ) -> AppResult<Option<CompletedChallenge>> {
        // One lock for the whole operation stands in for the transaction
        let mut tables = self.tables();

        let challenge_idx = tables
            .challenges
            .iter()
            .position(|c| c.id == completion.challenge_id)
            .ok_or_else(|| AppError::NotFound("Challenge not found".to_string()))?;

        if tables
            .completions
            .iter()
            .any(|c| c.user_id == completion.user_id && c.challenge_id == completion.challenge_id)
        {
            return Ok(None);
        }

        let user_idx = tables
            .users
            .iter()
            .position(|u| u.id == completion.user_id)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let challenge = &mut tables.challenges[challenge_idx];
        challenge.solve_count += 1;
        let first_blood = challenge.solve_count == 1;

        tables.users[user_idx].score += i64::from(completion.points_awarded);

        let record = CompletedChallenge {
            id: Uuid::new_v4(),
            user_id: completion.user_id,
            challenge_id: completion.challenge_id,
            time_to_solve: completion.time_to_solve,
            points_awarded: completion.points_awarded,
            first_blood,
            completed_at: Utc::now(),
        };
        tables.completions.push(record.clone());

        Ok(Some(record))
    }

    async fn solve_stats(&self, user_id: Uuid) -> AppResult<SolveStats> {
        let tables = self.tables();
        let stats = tables
            .completions
            .iter()
            .filter(|c| c.user_id == user_id)
            .filter_map(|c| {
                tables
                    .challenges
                    .iter()
                    .find(|ch| ch.id == c.challenge_id)
                    .map(|ch| SolveGroup {
                        category: ch.category.clone(),
                        difficulty: ch.difficulty,
                        solves: 1,
                        first_bloods: i64::from(c.first_blood),
                    })
            })
            .collect();
        Ok(stats)
    }

    async fn completion_times(&self, user_id: Uuid) -> AppResult<Vec<DateTime<Utc>>> {
        let mut times: Vec<DateTime<Utc>> = self
            .tables()
            .completions
            .iter()
            .filter(|c| c.user_id == user_id)
            .map(|c| c.completed_at)
            .collect();
        times.sort_unstable_by(|a, b| b.cmp(a));
        Ok(times)
    }

    async fn list_badges(&self) -> AppResult<Vec<Badge>> {
        Ok(self.all_badges())
    }

    async fn create_badge(&self, badge: &NewBadge) -> AppResult<Badge> {
        let mut tables = self.tables();
        if tables.badges.iter().any(|b| b.name == badge.name) {
            return Err(AppError::AlreadyExists("Resource already exists".to_string()));
        }

        let created = Badge {
            id: Uuid::new_v4(),
            name: badge.name.clone(),
            description: badge.description.clone(),
            icon: badge.icon.clone(),
            requirement: badge.requirement.to_string(),
            created_at: Utc::now(),
        };
        tables.badges.push(created.clone());
        Ok(created)
    }

    async fn user_badges(&self, user_id: Uuid) -> AppResult<Vec<Badge>> {
        let tables = self.tables();
        Ok(tables
            .awards
            .iter()
            .filter(|(user, _)| *user == user_id)
            .filter_map(|(_, badge_id)| tables.badges.iter().find(|b| b.id == *badge_id).cloned())
            .collect())
    }

    async fn badges_for_users(&self, user_ids: &[Uuid]) -> AppResult<Vec<AwardedBadge>> {
        let tables = self.tables();
        Ok(tables
            .awards
            .iter()
            .filter(|(user, _)| user_ids.contains(user))
            .filter_map(|(user, badge_id)| {
                tables
                    .badges
                    .iter()
                    .find(|b| b.id == *badge_id)
                    .map(|badge| AwardedBadge {
                        user_id: *user,
                        badge: badge.clone(),
                    })
            })
            .collect())
    }

    async fn award_badge(&self, user_id: Uuid, badge_id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables();
        if tables.awards.contains(&(user_id, badge_id)) {
            return Ok(false);
        }
        tables.awards.push((user_id, badge_id));
        Ok(true)
    }
}

/// Mint a signed token. A negative `ttl_secs` yields an expired token.
pub fn issue_token(id: Uuid, username: &str, role: &str, secret: &str, ttl_secs: i64) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: id.to_string(),
        username: username.to_string(),
        role: role.to_string(),
        exp: now + ttl_secs,
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

/// Bearer header value for a user
pub fn bearer(id: Uuid, role: &str) -> String {
    format!("Bearer {}", issue_token(id, "tester", role, TEST_JWT_SECRET, 3600))
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            log_format: "pretty".to_string(),
        },
        database: DatabaseConfig {
            url: "postgres://localhost/ctfarena_test".to_string(),
            kind: DatabaseKind::Postgres,
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
        },
        leaderboard: LeaderboardConfig::default(),
    }
}

/// Full application, service layers included, over an in-memory store with
/// the catalog loaded from it
pub fn test_app(store: Arc<MemoryStore>) -> Router {
    let catalog = BadgeCatalog::from_badges(store.all_badges());
    let state = AppState::new(store, catalog, test_config());
    crate::create_app(state)
}
