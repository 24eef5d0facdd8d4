use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Minimum plaintext password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 3;

/// User entity - a registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated id and timestamps. The password must
    /// already be hashed; the plaintext never reaches this type.
    pub fn new(username: String, name: Option<String>, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            name,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check the registration username requirement.
    pub fn validate_username(username: Option<&str>) -> Result<&str, DomainError> {
        let username = username
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| DomainError::Validation("username is required".to_string()))?;
        Ok(username)
    }

    /// Check the registration password policy before hashing.
    pub fn validate_password(password: Option<&str>) -> Result<&str, DomainError> {
        let password = password
            .ok_or_else(|| DomainError::Validation("password is required".to_string()))?;
        if password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters long"
            )));
        }
        Ok(password)
    }
}
