//! Badge model and requirement rules

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::Difficulty;
use crate::constants::milestone_categories;

/// Badge catalog row
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq, Eq)]
pub struct Badge {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub icon: Option<String>,
    pub requirement: String,
    pub created_at: DateTime<Utc>,
}

/// Data required to create a badge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBadge {
    pub name: String,
    pub description: String,
    pub icon: Option<String>,
    pub requirement: BadgeRequirement,
}

/// A badge held by a user, as read for leaderboard projection
#[derive(Debug, Clone, FromRow)]
pub struct AwardedBadge {
    pub user_id: Uuid,
    #[sqlx(flatten)]
    pub badge: Badge,
}

/// Typed form of a badge's `requirement` string.
///
/// String forms:
///
/// | form                        | variant            |
/// |-----------------------------|--------------------|
/// | `first-blood`               | `FirstBlood`       |
/// | `solve-N`                   | `TotalSolves`      |
/// | `category-<Category>-N`     | `CategorySolves`   |
/// | `difficulty-<level>-N`      | `DifficultySolves` |
/// | `score-N`                   | `ScoreThreshold`   |
/// | `top-N`                     | `TopRank`          |
///
/// Categories may themselves contain `-`; the threshold is always the last
/// segment. Thresholds must be at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BadgeRequirement {
    FirstBlood,
    TotalSolves(u32),
    CategorySolves { category: String, count: u32 },
    DifficultySolves { difficulty: Difficulty, count: u32 },
    ScoreThreshold(i64),
    TopRank(u32),
}

impl BadgeRequirement {
    /// Milestone grouping this requirement is shown under
    pub fn milestone_category(&self) -> &'static str {
        match self {
            Self::TotalSolves(_) => milestone_categories::SOLVES,
            Self::CategorySolves { .. } => milestone_categories::CATEGORIES,
            Self::DifficultySolves { .. } => milestone_categories::DIFFICULTY,
            Self::ScoreThreshold(_) => milestone_categories::SCORE,
            Self::FirstBlood | Self::TopRank(_) => milestone_categories::SPECIAL,
        }
    }

    /// Whether evaluating this rule requires the user's rank
    pub fn needs_rank(&self) -> bool {
        matches!(self, Self::TopRank(_))
    }
}

/// Requirement string could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequirementError {
    #[error("unknown requirement kind: {0}")]
    UnknownKind(String),

    #[error("invalid threshold in requirement: {0}")]
    InvalidThreshold(String),

    #[error("unknown difficulty in requirement: {0}")]
    UnknownDifficulty(String),

    #[error("missing category in requirement: {0}")]
    MissingCategory(String),
}

fn parse_count(raw: &str, requirement: &str) -> Result<u32, RequirementError> {
    match raw.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(RequirementError::InvalidThreshold(requirement.to_string())),
    }
}

impl FromStr for BadgeRequirement {
    type Err = RequirementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s == "first-blood" {
            return Ok(Self::FirstBlood);
        }

        if let Some(n) = s.strip_prefix("solve-") {
            return Ok(Self::TotalSolves(parse_count(n, s)?));
        }

        if let Some(n) = s.strip_prefix("top-") {
            return Ok(Self::TopRank(parse_count(n, s)?));
        }

        if let Some(n) = s.strip_prefix("score-") {
            return match n.parse::<i64>() {
                Ok(n) if n > 0 => Ok(Self::ScoreThreshold(n)),
                _ => Err(RequirementError::InvalidThreshold(s.to_string())),
            };
        }

        if let Some(rest) = s.strip_prefix("difficulty-") {
            let (level, n) = rest
                .rsplit_once('-')
                .ok_or_else(|| RequirementError::InvalidThreshold(s.to_string()))?;
            let difficulty = level
                .parse::<Difficulty>()
                .map_err(|_| RequirementError::UnknownDifficulty(s.to_string()))?;
            return Ok(Self::DifficultySolves {
                difficulty,
                count: parse_count(n, s)?,
            });
        }

        if let Some(rest) = s.strip_prefix("category-") {
            let (category, n) = rest
                .rsplit_once('-')
                .ok_or_else(|| RequirementError::InvalidThreshold(s.to_string()))?;
            if category.is_empty() {
                return Err(RequirementError::MissingCategory(s.to_string()));
            }
            return Ok(Self::CategorySolves {
                category: category.to_string(),
                count: parse_count(n, s)?,
            });
        }

        Err(RequirementError::UnknownKind(s.to_string()))
    }
}

impl fmt::Display for BadgeRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstBlood => write!(f, "first-blood"),
            Self::TotalSolves(n) => write!(f, "solve-{}", n),
            Self::CategorySolves { category, count } => write!(f, "category-{}-{}", category, count),
            Self::DifficultySolves { difficulty, count } => {
                write!(f, "difficulty-{}-{}", difficulty, count)
            }
            Self::ScoreThreshold(n) => write!(f, "score-{}", n),
            Self::TopRank(n) => write!(f, "top-{}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_forms() {
        assert_eq!("first-blood".parse(), Ok(BadgeRequirement::FirstBlood));
        assert_eq!("solve-10".parse(), Ok(BadgeRequirement::TotalSolves(10)));
        assert_eq!("score-5000".parse(), Ok(BadgeRequirement::ScoreThreshold(5000)));
        assert_eq!("top-3".parse(), Ok(BadgeRequirement::TopRank(3)));
        assert_eq!(
            "difficulty-hard-3".parse(),
            Ok(BadgeRequirement::DifficultySolves {
                difficulty: Difficulty::Hard,
                count: 3
            })
        );
        assert_eq!(
            "category-Web-5".parse(),
            Ok(BadgeRequirement::CategorySolves {
                category: "Web".to_string(),
                count: 5
            })
        );
    }

    #[test]
    fn test_category_with_hyphen() {
        assert_eq!(
            "category-Reverse-Engineering-2".parse(),
            Ok(BadgeRequirement::CategorySolves {
                category: "Reverse-Engineering".to_string(),
                count: 2
            })
        );
    }

    #[test]
    fn test_reject_malformed() {
        assert!(matches!(
            "solve-".parse::<BadgeRequirement>(),
            Err(RequirementError::InvalidThreshold(_))
        ));
        assert!(matches!(
            "solve-0".parse::<BadgeRequirement>(),
            Err(RequirementError::InvalidThreshold(_))
        ));
        assert!(matches!(
            "difficulty-insane-2".parse::<BadgeRequirement>(),
            Err(RequirementError::UnknownDifficulty(_))
        ));
        assert!(matches!(
            "category--4".parse::<BadgeRequirement>(),
            Err(RequirementError::MissingCategory(_))
        ));
        assert!(matches!(
            "streak-7".parse::<BadgeRequirement>(),
            Err(RequirementError::UnknownKind(_))
        ));
    }

    #[test]
    fn test_display_matches_stored_form() {
        for raw in [
            "first-blood",
            "solve-25",
            "category-Crypto-3",
            "difficulty-medium-10",
            "score-1000",
            "top-10",
        ] {
            let parsed: BadgeRequirement = raw.parse().unwrap();
            assert_eq!(parsed.to_string(), raw);
        }
    }

    #[test]
    fn test_milestone_category() {
        assert_eq!(BadgeRequirement::FirstBlood.milestone_category(), "special");
        assert_eq!(BadgeRequirement::TotalSolves(1).milestone_category(), "solves");
        assert!(BadgeRequirement::TopRank(10).needs_rank());
        assert!(!BadgeRequirement::ScoreThreshold(10).needs_rank());
    }
}
