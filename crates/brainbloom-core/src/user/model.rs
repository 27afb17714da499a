//! User identity domain model.

use crate::error::{BloomError, Result};
use serde::{Deserialize, Serialize};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// A persisted sign-in: the user plus the token issued for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Email/password sign-in request.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Checks that both fields are present and the password is long enough.
    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(BloomError::validation("Email and password are required"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(BloomError::validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(())
    }

    /// Display name derived from the part of the email before `@`.
    pub fn display_name(&self) -> String {
        let email = self.email.trim();
        email.split('@').next().unwrap_or(email).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_rejected() {
        let err = LoginCredentials::new("", "secret123").validate().unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Email and password are required");
        assert!(LoginCredentials::new("a@b.c", "").validate().is_err());
    }

    #[test]
    fn test_short_password_rejected() {
        let err = LoginCredentials::new("a@b.c", "12345").validate().unwrap_err();
        assert!(err.to_string().contains("at least 6 characters"));
        assert!(LoginCredentials::new("a@b.c", "123456").validate().is_ok());
    }

    #[test]
    fn test_display_name_is_email_prefix() {
        assert_eq!(LoginCredentials::new("sam.lee@example.com", "x").display_name(), "sam.lee");
        assert_eq!(LoginCredentials::new("nodomain", "x").display_name(), "nodomain");
    }
}
