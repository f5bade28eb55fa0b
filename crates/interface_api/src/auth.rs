//! Authentication
//!
//! Accounts and passwords live in an external credential store. This API only
//! verifies the HS256 bearer tokens that store issues and turns their claims
//! into an [`Actor`].

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::UserId;
use domain_users::{Actor, Role};

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// User's roles
    pub roles: Vec<String>,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

impl Claims {
    /// The requester these claims authenticate
    pub fn actor(&self) -> Result<Actor, AuthError> {
        let id: UserId = self.sub.parse().map_err(|_| AuthError::InvalidSubject)?;
        Ok(Actor::new(id, Role::from_grants(&self.roles)))
    }
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Token subject is not a user id")]
    InvalidSubject,
}

/// Creates a new JWT token
///
/// # Arguments
///
/// * `user_id` - User identifier
/// * `roles` - User's roles (`admin` grants admin rights)
/// * `secret` - JWT secret key
/// * `expiration_secs` - Token validity in seconds
pub fn create_token(
    user_id: UserId,
    roles: Vec<String>,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = Claims {
        sub: user_id.as_uuid().to_string(),
        roles,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Creates a token for an actor, carrying its role as the only grant
pub fn token_for(actor: &Actor, secret: &str, expiration_secs: u64) -> Result<String, AuthError> {
    create_token(actor.id, vec![actor.role.as_str().to_string()], secret, expiration_secs)
}

/// Validates a JWT token
///
/// # Arguments
///
/// * `token` - The JWT token to validate
/// * `secret` - JWT secret key
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_token_round_trip_yields_actor() {
        let admin = Actor::admin(UserId::new());
        let token = token_for(&admin, SECRET, 60).unwrap();

        let actor = validate_token(&token, SECRET).unwrap().actor().unwrap();
        assert_eq!(actor, admin);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = token_for(&Actor::student(UserId::new()), SECRET, 60).unwrap();
        assert!(matches!(
            validate_token(&token, "other-secret"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token() {
        let claims = Claims {
            sub: UserId::new().as_uuid().to_string(),
            roles: vec!["student".to_string()],
            exp: (Utc::now() - Duration::hours(1)).timestamp(),
            iat: (Utc::now() - Duration::hours(2)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(validate_token(&token, SECRET), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_subject_must_be_user_id() {
        let claims = Claims {
            sub: "alice".to_string(),
            roles: Vec::new(),
            exp: 0,
            iat: 0,
        };
        assert!(matches!(claims.actor(), Err(AuthError::InvalidSubject)));
    }
}
