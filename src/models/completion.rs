//! Completion record model

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::Difficulty;

/// The persisted fact that a user solved a challenge.
///
/// At most one row exists per `(user_id, challenge_id)`. `points_awarded`
/// is fixed at creation and never recomputed.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CompletedChallenge {
    pub id: Uuid,
    pub user_id: Uuid,
    pub challenge_id: Uuid,
    /// Seconds between the client-reported start and the submission
    pub time_to_solve: Option<i64>,
    pub points_awarded: i32,
    /// Set when this solve moved the challenge's solve count from 0 to 1
    pub first_blood: bool,
    pub completed_at: DateTime<Utc>,
}

/// Data required to record a successful solve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCompletion {
    pub user_id: Uuid,
    pub challenge_id: Uuid,
    pub time_to_solve: Option<i64>,
    pub points_awarded: i32,
}

/// Aggregate solve counters for one user, recomputed from completion records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolveStats {
    pub total: i64,
    pub by_category: HashMap<String, i64>,
    pub by_difficulty: HashMap<Difficulty, i64>,
    pub first_bloods: i64,
}

/// One `(category, difficulty)` bucket of a user's solves
#[derive(Debug, Clone, FromRow)]
pub struct SolveGroup {
    pub category: String,
    #[sqlx(try_from = "String")]
    pub difficulty: Difficulty,
    pub solves: i64,
    pub first_bloods: i64,
}

impl FromIterator<SolveGroup> for SolveStats {
    fn from_iter<I: IntoIterator<Item = SolveGroup>>(groups: I) -> Self {
        let mut stats = SolveStats::default();
        for group in groups {
            stats.total += group.solves;
            stats.first_bloods += group.first_bloods;
            *stats.by_category.entry(group.category).or_insert(0) += group.solves;
            *stats.by_difficulty.entry(group.difficulty).or_insert(0) += group.solves;
        }
        stats
    }
}

impl SolveStats {
    /// Solves within a category (case-sensitive)
    pub fn in_category(&self, category: &str) -> i64 {
        self.by_category.get(category).copied().unwrap_or(0)
    }

    /// Solves at a difficulty level
    pub fn at_difficulty(&self, difficulty: Difficulty) -> i64 {
        self.by_difficulty.get(&difficulty).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(category: &str, difficulty: Difficulty, solves: i64, first_bloods: i64) -> SolveGroup {
        SolveGroup {
            category: category.to_string(),
            difficulty,
            solves,
            first_bloods,
        }
    }

    #[test]
    fn test_stats_fold_groups() {
        let stats: SolveStats = vec![
            group("Web", Difficulty::Easy, 3, 1),
            group("Web", Difficulty::Hard, 2, 0),
            group("Crypto", Difficulty::Hard, 1, 1),
        ]
        .into_iter()
        .collect();

        assert_eq!(stats.total, 6);
        assert_eq!(stats.first_bloods, 2);
        assert_eq!(stats.in_category("Web"), 5);
        assert_eq!(stats.in_category("web"), 0);
        assert_eq!(stats.at_difficulty(Difficulty::Hard), 3);
        assert_eq!(stats.at_difficulty(Difficulty::Medium), 0);
    }
}
