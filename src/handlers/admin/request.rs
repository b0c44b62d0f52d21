//! Admin request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Create challenge request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateChallengeRequest {
    #[validate(length(min = 1, max = 256))]
    pub title: String,

    #[validate(length(max = 65535))]
    pub description: String,

    #[validate(length(min = 1, max = 512))]
    pub flag: String,

    #[validate(range(min = 0, max = 1000000))]
    pub points: i32,

    /// One of `easy`, `medium`, `hard`
    pub difficulty: String,

    #[validate(length(min = 1, max = 64))]
    pub category: String,
}

/// Create badge request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBadgeRequest {
    #[validate(length(min = 1, max = 128))]
    pub name: String,

    #[validate(length(max = 1024))]
    pub description: String,

    #[validate(length(max = 256))]
    pub icon: Option<String>,

    /// Rule string such as `solve-10` or `category-Web-5`
    #[validate(length(min = 1, max = 128))]
    pub requirement: String,
}

/// Manual score adjustment. Scores only ever increase.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdjustPointsRequest {
    #[validate(range(min = 1, max = 1000000))]
    pub points: i64,

    #[validate(length(max = 512))]
    pub reason: Option<String>,
}

/// Re-run badge evaluation for one completed challenge
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateBadgesRequest {
    pub challenge_id: Uuid,
}
