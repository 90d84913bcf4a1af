use thiserror::Error;

use crate::session::errors::SessionError;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username is required")]
    Empty,

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for Password policy failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error(
        "Password must be longer than {} chars",
        crate::user::models::Password::MIN_LENGTH - 1
    )]
    TooShort { min: usize, actual: usize },
}

/// Top-level error for all authentication operations
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Value object validation errors (automatically converted via #[from])
    #[error("{0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("{0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    // Domain-level errors
    #[error("Username taken")]
    UsernameTaken(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<auth::AuthenticationError> for AuthError {
    fn from(err: auth::AuthenticationError) -> Self {
        match err {
            auth::AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
            auth::AuthenticationError::PasswordError(e) => AuthError::Password(e),
        }
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError::Unknown(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_policy_message() {
        let err = PasswordPolicyError::TooShort { min: 4, actual: 3 };
        assert_eq!(err.to_string(), "Password must be longer than 3 chars");
    }

    #[test]
    fn test_username_taken_hides_username() {
        let err = AuthError::UsernameTaken("sue".to_string());
        assert_eq!(err.to_string(), "Username taken");
    }
}
