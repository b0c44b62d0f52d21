//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User database model
///
/// Accounts are owned by the account subsystem; the scoring engine only
/// reads identity and adds to `score`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub role: String,
    pub is_banned: bool,
    pub score: i64,
    pub created_at: DateTime<Utc>,
}

/// A user's position in the score ordering, as read from storage
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserStanding {
    pub user_id: Uuid,
    pub username: String,
    pub score: i64,
    pub solved_count: i64,
}
