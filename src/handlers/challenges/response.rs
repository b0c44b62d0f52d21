//! Challenge response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    constants::messages,
    handlers::badges::response::BadgeResponse,
    models::{Challenge, Difficulty},
    services::SubmissionOutcome,
};

/// Public challenge view. Never carries the flag.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub points: i32,
    pub difficulty: Difficulty,
    pub category: String,
    pub solve_count: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Challenge> for ChallengeResponse {
    fn from(challenge: Challenge) -> Self {
        Self {
            id: challenge.id,
            title: challenge.title,
            description: challenge.description,
            points: challenge.points,
            difficulty: challenge.difficulty,
            category: challenge.category,
            solve_count: challenge.solve_count,
            created_at: challenge.created_at,
        }
    }
}

/// Flag submission response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFlagResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_points: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus_points: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_badges: Option<Vec<BadgeResponse>>,
}

impl SubmitFlagResponse {
    fn failure(message: &str) -> Self {
        Self {
            success: false,
            message: Some(message.to_string()),
            points: None,
            base_points: None,
            bonus_points: None,
            new_badges: None,
        }
    }
}

impl From<SubmissionOutcome> for SubmitFlagResponse {
    fn from(outcome: SubmissionOutcome) -> Self {
        match outcome {
            SubmissionOutcome::Solved(result) => Self {
                success: true,
                message: Some(messages::CORRECT_FLAG.to_string()),
                points: Some(result.points_awarded),
                base_points: Some(result.base_points),
                bonus_points: Some(result.bonus_points),
                new_badges: result
                    .new_badges
                    .map(|badges| badges.into_iter().map(BadgeResponse::from).collect()),
            },
            SubmissionOutcome::IncorrectFlag => Self::failure(messages::INCORRECT_FLAG),
            SubmissionOutcome::AlreadyCompleted => Self::failure(messages::ALREADY_COMPLETED),
        }
    }
}
