//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// LEADERBOARD DEFAULTS
// =============================================================================

/// Default number of entries returned by the leaderboard
pub const DEFAULT_LEADERBOARD_LIMIT: i64 = 100;

/// Hard upper bound on the leaderboard cap
pub const MAX_LEADERBOARD_LIMIT: i64 = 1000;

// =============================================================================
// TIME BONUS
// =============================================================================

/// Time bonus brackets as `(solved under N seconds, percent of base points)`.
///
/// Brackets are checked in order; the first match wins.
pub const TIME_BONUS_BRACKETS: &[(i64, i64)] = &[(300, 50), (600, 25), (1800, 10)];

// =============================================================================
// USER ROLES
// =============================================================================

/// User role identifiers
pub mod roles {
    pub const USER: &str = "user";
    pub const ADMIN: &str = "admin";
    pub const HACKER: &str = "hacker";

    /// All user roles
    pub const ALL: &[&str] = &[USER, ADMIN, HACKER];
}

// =============================================================================
// CHALLENGE SETTINGS
// =============================================================================

/// Challenge difficulty identifiers
pub mod difficulties {
    pub const EASY: &str = "easy";
    pub const MEDIUM: &str = "medium";
    pub const HARD: &str = "hard";

    /// All difficulty levels
    pub const ALL: &[&str] = &[EASY, MEDIUM, HARD];
}

/// Milestone groupings shown to users
pub mod milestone_categories {
    pub const SOLVES: &str = "solves";
    pub const CATEGORIES: &str = "categories";
    pub const DIFFICULTY: &str = "difficulty";
    pub const SCORE: &str = "score";
    pub const SPECIAL: &str = "special";

    /// Display order
    pub const ALL: &[&str] = &[SOLVES, CATEGORIES, DIFFICULTY, SCORE, SPECIAL];
}

// =============================================================================
// SUBMISSION MESSAGES
// =============================================================================

/// User-facing submission outcome messages
pub mod messages {
    pub const CORRECT_FLAG: &str = "Correct flag!";
    pub const INCORRECT_FLAG: &str = "Incorrect flag";
    pub const ALREADY_COMPLETED: &str = "Challenge already completed";
}

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum challenge title length
pub const MAX_CHALLENGE_TITLE_LENGTH: u64 = 256;

/// Maximum category name length
pub const MAX_CATEGORY_LENGTH: u64 = 64;

/// Upper bound on a challenge's base points, also enforced by the schema
pub const MAX_CHALLENGE_POINTS: i32 = 1_000_000;

// =============================================================================
// REQUEST LIMITS
// =============================================================================

/// Maximum accepted request body size in bytes
pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// Per-request timeout in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
