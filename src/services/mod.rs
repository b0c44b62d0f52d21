//! Business logic services

pub mod admin_service;
pub mod auth_service;
pub mod badge_service;
pub mod leaderboard_service;
pub mod progress_service;
pub mod submission_service;
pub mod user_service;

pub use admin_service::AdminService;
pub use auth_service::AuthService;
pub use badge_service::{BadgeCatalog, BadgeService, CatalogEntry, ProgressCounters};
pub use leaderboard_service::LeaderboardService;
pub use progress_service::ProgressService;
pub use submission_service::{
    FlagSubmission, SolveResult, SubmissionOutcome, SubmissionService, time_bonus,
};
pub use user_service::UserService;
