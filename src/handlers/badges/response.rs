//! Badge response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::Badge;

/// Badge response
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BadgeResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub icon: Option<String>,
    pub requirement: String,
    pub created_at: DateTime<Utc>,
}

impl From<Badge> for BadgeResponse {
    fn from(badge: Badge) -> Self {
        Self {
            id: badge.id,
            name: badge.name,
            description: badge.description,
            icon: badge.icon,
            requirement: badge.requirement,
            created_at: badge.created_at,
        }
    }
}
