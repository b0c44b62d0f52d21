//! Input validation utilities

use crate::constants;

/// Sanitize string input (remove control characters, trim whitespace)
pub fn sanitize_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Validate and sanitize challenge title
pub fn validate_challenge_title(title: &str) -> Result<String, &'static str> {
    let sanitized = sanitize_string(title);
    if sanitized.is_empty() {
        return Err("Challenge title cannot be empty");
    }
    if sanitized.len() as u64 > constants::MAX_CHALLENGE_TITLE_LENGTH {
        return Err("Challenge title must be at most 256 characters");
    }
    Ok(sanitized)
}

/// Validate a category name.
///
/// Categories are matched case-sensitively by badge rules, so they are
/// stored exactly as given; surrounding whitespace is rejected rather than
/// trimmed.
pub fn validate_category(category: &str) -> Result<(), &'static str> {
    if category.is_empty() {
        return Err("Category cannot be empty");
    }
    if category.len() as u64 > constants::MAX_CATEGORY_LENGTH {
        return Err("Category must be at most 64 characters");
    }
    if category.trim() != category {
        return Err("Category cannot start or end with whitespace");
    }
    if category.chars().any(|c| c.is_control()) {
        return Err("Category cannot contain control characters");
    }
    Ok(())
}

/// Validate challenge difficulty
pub fn validate_difficulty(difficulty: &str) -> Result<(), &'static str> {
    if constants::difficulties::ALL.contains(&difficulty) {
        Ok(())
    } else {
        Err("Difficulty must be one of easy, medium, hard")
    }
}

/// Validate user role
pub fn validate_role(role: &str) -> Result<(), &'static str> {
    if constants::roles::ALL.contains(&role) {
        Ok(())
    } else {
        Err("Invalid role")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_challenge_title() {
        assert_eq!(validate_challenge_title("  SQLi 101 ").unwrap(), "SQLi 101");
        assert!(validate_challenge_title("   ").is_err());
        assert!(validate_challenge_title(&"a".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_category() {
        assert!(validate_category("Web").is_ok());
        assert!(validate_category("Reverse-Engineering").is_ok());
        assert!(validate_category("").is_err());
        assert!(validate_category(" Web").is_err());
        assert!(validate_category("We\u{0007}b").is_err());
    }

    #[test]
    fn test_validate_difficulty() {
        assert!(validate_difficulty("easy").is_ok());
        assert!(validate_difficulty("hard").is_ok());
        assert!(validate_difficulty("Hard").is_err());
        assert!(validate_difficulty("insane").is_err());
    }

    #[test]
    fn test_validate_role() {
        assert!(validate_role("hacker").is_ok());
        assert!(validate_role("organizer").is_err());
    }
}
