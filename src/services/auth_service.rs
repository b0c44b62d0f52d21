//! Authentication service
//!
//! Tokens are issued by the account subsystem; this service only verifies them.

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;

/// JWT claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub username: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Verify JWT token
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::AppError, test_utils::issue_token};
    use uuid::Uuid;

    #[test]
    fn test_verify_round_trip() {
        let id = Uuid::new_v4();
        let token = issue_token(id, "alice", "user", "secret", 3600);
        let claims = AuthService::verify_token(&token, "secret").unwrap();
        assert_eq!(claims.sub, id.to_string());
        assert_eq!(claims.role, "user");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issue_token(Uuid::new_v4(), "alice", "user", "secret", 3600);
        assert!(matches!(
            AuthService::verify_token(&token, "other"),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = issue_token(Uuid::new_v4(), "alice", "user", "secret", -3600);
        assert!(matches!(
            AuthService::verify_token(&token, "secret"),
            Err(AppError::TokenExpired)
        ));
    }
}
