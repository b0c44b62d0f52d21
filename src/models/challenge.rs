//! Challenge model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::difficulties;

/// Challenge database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Challenge {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing)]
    pub flag: String,
    pub points: i32,
    #[sqlx(try_from = "String")]
    pub difficulty: Difficulty,
    pub category: String,
    pub solve_count: i32,
    pub created_at: DateTime<Utc>,
}

impl Challenge {
    /// Exact, case-sensitive flag comparison. No trimming, no normalization.
    pub fn flag_matches(&self, candidate: &str) -> bool {
        self.flag == candidate
    }
}

/// Data required to create a challenge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChallenge {
    pub title: String,
    pub description: String,
    pub flag: String,
    pub points: i32,
    pub difficulty: Difficulty,
    pub category: String,
}

/// Challenge difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Get difficulty as its stored string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => difficulties::EASY,
            Self::Medium => difficulties::MEDIUM,
            Self::Hard => difficulties::HARD,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown difficulty string
#[derive(Debug, thiserror::Error)]
#[error("unknown difficulty: {0}")]
pub struct UnknownDifficulty(pub String);

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            difficulties::EASY => Ok(Self::Easy),
            difficulties::MEDIUM => Ok(Self::Medium),
            difficulties::HARD => Ok(Self::Hard),
            _ => Err(UnknownDifficulty(s.to_string())),
        }
    }
}

impl TryFrom<String> for Difficulty {
    type Error = UnknownDifficulty;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
