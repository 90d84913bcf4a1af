use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use uuid::Uuid;

use crate::session::errors::SessionError;
use crate::user::models::PublicUser;

/// Opaque session identifier carried by the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    const MAX_LENGTH: usize = 128;

    /// Generate a fresh random session ID (UUID v4, 122 random bits).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Accept an identifier presented by a client.
    ///
    /// Returns `None` for values that could never have been issued.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty()
            || raw.len() > Self::MAX_LENGTH
            || !raw.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Server-side session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub user: PublicUser,
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new(user: PublicUser, ttl: Duration) -> Self {
        Self {
            user,
            expires_at: Utc::now() + ttl,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Result of a logout attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// The request carried no live session.
    NoSession,
    LoggedOut,
    /// The session existed but could not be destroyed.
    Failed(SessionError),
}
