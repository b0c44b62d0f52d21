//! Leaderboard response DTOs

use serde::Serialize;
use uuid::Uuid;

use crate::handlers::badges::response::BadgeResponse;

/// One ranked row of the leaderboard
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub user_id: Uuid,
    pub username: String,
    pub score: i64,
    pub badges: Vec<BadgeResponse>,
    pub solved_count: i64,
    pub rank: i64,
}
