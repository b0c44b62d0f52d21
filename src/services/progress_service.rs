//! Milestone progress projection

use std::collections::HashSet;

use uuid::Uuid;

use crate::{
    config::LeaderboardConfig,
    constants::milestone_categories,
    db::Store,
    error::{AppError, AppResult},
    handlers::users::response::{MilestoneGroup, MilestoneResponse, MilestonesResponse},
    services::{BadgeCatalog, BadgeService},
};

/// Progress service for business logic
pub struct ProgressService;

impl ProgressService {
    /// Every catalog badge as a milestone, grouped for display. Progress is
    /// measured with the same counters the badge evaluator uses; `completed`
    /// reflects whether the badge is actually held.
    pub async fn get_milestones(
        store: &dyn Store,
        catalog: &BadgeCatalog,
        user_id: Uuid,
        config: &LeaderboardConfig,
    ) -> AppResult<MilestonesResponse> {
        let user = store
            .find_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let counters = BadgeService::counters_for(store, catalog, &user, config).await?;

        let held: HashSet<Uuid> = store
            .user_badges(user_id)
            .await?
            .into_iter()
            .map(|b| b.id)
            .collect();

        let categories = milestone_categories::ALL
            .iter()
            .map(|category| MilestoneGroup {
                category: category.to_string(),
                milestones: catalog
                    .entries()
                    .iter()
                    .filter(|e| e.requirement.milestone_category() == *category)
                    .map(|e| {
                        let (current, total) = counters.measure(&e.requirement);
                        MilestoneResponse {
                            id: e.badge.id,
                            name: e.badge.name.clone(),
                            description: e.badge.description.clone(),
                            progress: current.clamp(0, total),
                            total,
                            completed: held.contains(&e.badge.id),
                        }
                    })
                    .collect(),
            })
            .filter(|group: &MilestoneGroup| !group.milestones.is_empty())
            .collect();

        Ok(MilestonesResponse { categories })
    }
}
