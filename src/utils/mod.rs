//! Utility functions

pub mod time;
pub mod validation;

pub use time::{elapsed_seconds, now_utc, solve_streak};
pub use validation::{sanitize_string, validate_category, validate_challenge_title, validate_difficulty};
