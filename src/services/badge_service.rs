//! Badge catalog and badge evaluation
//!
//! The catalog parses every badge's `requirement` once, when loaded. The
//! evaluator re-derives a user's counters from persisted data after a solve
//! and awards every badge whose rule is newly met.

use std::collections::HashSet;

use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    config::LeaderboardConfig,
    db::Store,
    error::{AppError, AppResult},
    models::{Badge, BadgeRequirement, Challenge, CompletedChallenge, SolveStats},
    services::LeaderboardService,
};

/// A catalog badge with its parsed rule
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub badge: Badge,
    pub requirement: BadgeRequirement,
}

/// All badges with a usable requirement
#[derive(Debug, Clone, Default)]
pub struct BadgeCatalog {
    entries: Vec<CatalogEntry>,
}

impl BadgeCatalog {
    /// Build a catalog, skipping badges whose requirement does not parse
    pub fn from_badges(badges: Vec<Badge>) -> Self {
        let entries = badges
            .into_iter()
            .filter_map(|badge| match badge.requirement.parse::<BadgeRequirement>() {
                Ok(requirement) => Some(CatalogEntry { badge, requirement }),
                Err(e) => {
                    warn!(
                        badge_id = %badge.id,
                        badge = %badge.name,
                        requirement = %badge.requirement,
                        error = %e,
                        "Skipping badge with unparseable requirement"
                    );
                    None
                }
            })
            .collect();

        Self { entries }
    }

    /// Load the catalog from storage
    pub async fn load(store: &dyn Store) -> AppResult<Self> {
        let catalog = Self::from_badges(store.list_badges().await?);
        info!(badges = catalog.len(), "Badge catalog loaded");
        Ok(catalog)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any rule depends on the user's rank
    pub fn needs_rank(&self) -> bool {
        self.entries.iter().any(|e| e.requirement.needs_rank())
    }
}

/// The counters every requirement is measured against
#[derive(Debug, Clone, Default)]
pub struct ProgressCounters {
    pub stats: SolveStats,
    pub score: i64,
    /// `None` when rank was not needed or the user is not ranked
    pub rank: Option<i64>,
}

impl ProgressCounters {
    /// `(current, target)` for a requirement. The rule is met when
    /// `current >= target`.
    pub fn measure(&self, requirement: &BadgeRequirement) -> (i64, i64) {
        match requirement {
            BadgeRequirement::FirstBlood => (self.stats.first_bloods, 1),
            BadgeRequirement::TotalSolves(n) => (self.stats.total, i64::from(*n)),
            BadgeRequirement::CategorySolves { category, count } => {
                (self.stats.in_category(category), i64::from(*count))
            }
            BadgeRequirement::DifficultySolves { difficulty, count } => {
                (self.stats.at_difficulty(*difficulty), i64::from(*count))
            }
            BadgeRequirement::ScoreThreshold(n) => (self.score, *n),
            BadgeRequirement::TopRank(n) => {
                let within = self.rank.is_some_and(|r| r <= i64::from(*n));
                (i64::from(within), 1)
            }
        }
    }

    /// Whether a requirement is numerically met
    pub fn meets(&self, requirement: &BadgeRequirement) -> bool {
        let (current, target) = self.measure(requirement);
        current >= target
    }
}

/// Whether a solve makes a requirement eligible for award.
///
/// Category and difficulty rules are only checked for the category and
/// difficulty of the challenge just solved. First blood comes from the
/// completion record itself, never from the user's overall first-blood count.
pub fn qualifies(
    requirement: &BadgeRequirement,
    counters: &ProgressCounters,
    solved: &Challenge,
    completion: &CompletedChallenge,
) -> bool {
    match requirement {
        BadgeRequirement::FirstBlood => completion.first_blood,
        BadgeRequirement::CategorySolves { category, .. } => {
            *category == solved.category && counters.meets(requirement)
        }
        BadgeRequirement::DifficultySolves { difficulty, .. } => {
            *difficulty == solved.difficulty && counters.meets(requirement)
        }
        BadgeRequirement::TotalSolves(_)
        | BadgeRequirement::ScoreThreshold(_)
        | BadgeRequirement::TopRank(_) => counters.meets(requirement),
    }
}

/// Badge service for business logic
pub struct BadgeService;

impl BadgeService {
    /// Current counters for a user, with rank only when some rule needs it
    pub async fn counters_for(
        store: &dyn Store,
        catalog: &BadgeCatalog,
        user: &crate::models::User,
        config: &LeaderboardConfig,
    ) -> AppResult<ProgressCounters> {
        let stats = store.solve_stats(user.id).await?;
        let rank = if catalog.needs_rank() {
            LeaderboardService::rank_of(store, user, config).await?
        } else {
            None
        };

        Ok(ProgressCounters {
            stats,
            score: user.score,
            rank,
        })
    }

    /// Evaluate the catalog for a user after solving `challenge_id` and
    /// award every newly qualified badge. Returns only badges created by
    /// this call.
    pub async fn evaluate(
        store: &dyn Store,
        catalog: &BadgeCatalog,
        user_id: Uuid,
        challenge_id: Uuid,
        config: &LeaderboardConfig,
    ) -> AppResult<Vec<Badge>> {
        let challenge = store
            .find_challenge(challenge_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Challenge not found".to_string()))?;

        let completion = store
            .find_completion(user_id, challenge_id)
            .await?
            .ok_or_else(|| {
                AppError::Validation("Challenge has not been completed by this user".to_string())
            })?;

        let user = store
            .find_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let counters = Self::counters_for(store, catalog, &user, config).await?;

        let held: HashSet<Uuid> = store
            .user_badges(user_id)
            .await?
            .into_iter()
            .map(|b| b.id)
            .collect();

        let mut awarded = Vec::new();
        for entry in catalog.entries() {
            if held.contains(&entry.badge.id)
                || !qualifies(&entry.requirement, &counters, &challenge, &completion)
            {
                continue;
            }

            // A concurrent evaluation may have won the insert; that is not an error
            if store.award_badge(user_id, entry.badge.id).await? {
                info!(
                    user_id = %user_id,
                    challenge_id = %challenge_id,
                    badge_id = %entry.badge.id,
                    badge = %entry.badge.name,
                    "Badge awarded"
                );
                awarded.push(entry.badge.clone());
            }
        }

        Ok(awarded)
    }
}
