//! User service

use uuid::Uuid;

use crate::{
    config::LeaderboardConfig,
    db::Store,
    error::{AppError, AppResult},
    handlers::{badges::response::BadgeResponse, users::response::UserStatsResponse},
    models::User,
    services::LeaderboardService,
    utils::{now_utc, solve_streak},
};

/// User service for business logic
pub struct UserService;

impl UserService {
    /// Get user by ID
    pub async fn get_user_by_id(store: &dyn Store, id: Uuid) -> AppResult<User> {
        store
            .find_user(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Get user statistics
    pub async fn get_user_stats(
        store: &dyn Store,
        id: Uuid,
        config: &LeaderboardConfig,
    ) -> AppResult<UserStatsResponse> {
        let user = Self::get_user_by_id(store, id).await?;

        let (rank, stats, badges, times) = futures::try_join!(
            LeaderboardService::rank_of(store, &user, config),
            store.solve_stats(id),
            store.user_badges(id),
            store.completion_times(id),
        )?;

        Ok(UserStatsResponse {
            rank,
            total_points: user.score,
            challenges_solved: stats.total,
            badges_earned: badges.len() as i64,
            streak: solve_streak(&times, now_utc().date_naive()),
        })
    }

    /// Badges held by a user, oldest award first
    pub async fn get_user_badges(store: &dyn Store, id: Uuid) -> AppResult<Vec<BadgeResponse>> {
        Self::get_user_by_id(store, id).await?;

        let badges = store.user_badges(id).await?;
        Ok(badges.into_iter().map(BadgeResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{Difficulty, NewCompletion},
        test_utils::MemoryStore,
    };

    #[tokio::test]
    async fn test_user_stats() {
        let store = MemoryStore::new();
        store.add_user("leader", 1000);
        let user = store.add_user("alice", 0);
        let badge = store.add_badge("One", "solve-1");
        for (i, points) in [100, 200].into_iter().enumerate() {
            let c = store.add_challenge(&format!("c{}", i), "flag", points, Difficulty::Easy, "Web");
            store
                .record_completion(&NewCompletion {
                    user_id: user,
                    challenge_id: c,
                    time_to_solve: None,
                    points_awarded: points,
                })
                .await
                .unwrap();
        }
        store.award_badge(user, badge).await.unwrap();

        let stats = UserService::get_user_stats(&store, user, &LeaderboardConfig::default())
            .await
            .unwrap();
        assert_eq!(stats.rank, Some(2));
        assert_eq!(stats.total_points, 300);
        assert_eq!(stats.challenges_solved, 2);
        assert_eq!(stats.badges_earned, 1);
        assert_eq!(stats.streak, 1);
    }

    #[tokio::test]
    async fn test_banned_user_has_no_rank() {
        let store = MemoryStore::new();
        let user = store.add_user("mallory", 50);
        store.ban_user(user);

        let stats = UserService::get_user_stats(&store, user, &LeaderboardConfig::default())
            .await
            .unwrap();
        assert_eq!(stats.rank, None);
        assert_eq!(stats.streak, 0);
    }

    #[tokio::test]
    async fn test_unknown_user_not_found() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        assert!(matches!(
            UserService::get_user_stats(&store, id, &LeaderboardConfig::default()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            UserService::get_user_badges(&store, id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
