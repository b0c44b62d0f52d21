//! Admin response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    handlers::badges::response::BadgeResponse,
    models::{Challenge, Difficulty},
};

/// Challenge as seen by admins, flag included
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminChallengeResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub flag: String,
    pub points: i32,
    pub difficulty: Difficulty,
    pub category: String,
    pub solve_count: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Challenge> for AdminChallengeResponse {
    fn from(challenge: Challenge) -> Self {
        Self {
            id: challenge.id,
            title: challenge.title,
            description: challenge.description,
            flag: challenge.flag,
            points: challenge.points,
            difficulty: challenge.difficulty,
            category: challenge.category,
            solve_count: challenge.solve_count,
            created_at: challenge.created_at,
        }
    }
}

/// Score after a manual adjustment
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsAdjustedResponse {
    pub user_id: Uuid,
    pub score: i64,
}

/// Badges created by a re-evaluation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateBadgesResponse {
    pub new_badges: Vec<BadgeResponse>,
}
