//! Leaderboard and rank aggregation
//!
//! Ranking uses standard competition ranking (SQL `RANK()`): equal scores
//! share a rank and the next distinct score skips ahead by the size of the
//! tie. The same definition backs the leaderboard, user stats and `top-N`
//! badge rules:
//!
//! ```text
//! rank(user) = 1 + |{ ranked users with score > user.score }|
//! ```

use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    config::LeaderboardConfig,
    db::Store,
    error::AppResult,
    handlers::{badges::response::BadgeResponse, leaderboard::response::LeaderboardEntry},
    models::User,
};

/// Leaderboard service for business logic
pub struct LeaderboardService;

impl LeaderboardService {
    /// Ranked leaderboard, capped at the configured limit
    pub async fn get_leaderboard(
        store: &dyn Store,
        config: &LeaderboardConfig,
    ) -> AppResult<Vec<LeaderboardEntry>> {
        let standings = store.ranked_users(config.limit, config.include_banned).await?;

        let user_ids: Vec<Uuid> = standings.iter().map(|s| s.user_id).collect();
        let mut badges: HashMap<Uuid, Vec<BadgeResponse>> = HashMap::new();
        for awarded in store.badges_for_users(&user_ids).await? {
            badges
                .entry(awarded.user_id)
                .or_default()
                .push(awarded.badge.into());
        }

        let scores: Vec<i64> = standings.iter().map(|s| s.score).collect();
        let ranks = competition_ranks(&scores);

        let entries = standings
            .into_iter()
            .zip(ranks)
            .map(|(standing, rank)| LeaderboardEntry {
                badges: badges.remove(&standing.user_id).unwrap_or_default(),
                user_id: standing.user_id,
                username: standing.username,
                score: standing.score,
                solved_count: standing.solved_count,
                rank,
            })
            .collect();

        Ok(entries)
    }

    /// Rank of a single user, or `None` when the user is excluded from
    /// ranking (banned, with banned users not ranked).
    pub async fn rank_of(
        store: &dyn Store,
        user: &User,
        config: &LeaderboardConfig,
    ) -> AppResult<Option<i64>> {
        if user.is_banned && !config.include_banned {
            return Ok(None);
        }

        let above = store
            .count_users_above(user.score, config.include_banned)
            .await?;

        Ok(Some(above + 1))
    }
}

/// Competition ranks for scores already sorted in descending order.
pub fn competition_ranks(scores: &[i64]) -> Vec<i64> {
    let mut ranks = Vec::with_capacity(scores.len());
    let mut current_rank = 0;

    for (index, score) in scores.iter().enumerate() {
        if index == 0 || scores[index - 1] != *score {
            current_rank = index as i64 + 1;
        }
        ranks.push(current_rank);
    }

    ranks
}
