//! User response DTOs

use serde::Serialize;
use uuid::Uuid;

/// User statistics response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatsResponse {
    /// `null` for users excluded from ranking
    pub rank: Option<i64>,
    pub total_points: i64,
    pub challenges_solved: i64,
    pub badges_earned: i64,
    pub streak: u32,
}

/// Progress toward a single badge
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub progress: i64,
    pub total: i64,
    pub completed: bool,
}

/// Milestones under one display category
#[derive(Debug, Serialize)]
pub struct MilestoneGroup {
    pub category: String,
    pub milestones: Vec<MilestoneResponse>,
}

#[derive(Debug, Serialize)]
pub struct MilestonesResponse {
    pub categories: Vec<MilestoneGroup>,
}
