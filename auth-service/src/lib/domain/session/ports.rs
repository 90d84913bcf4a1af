use async_trait::async_trait;

use crate::session::errors::SessionError;
use crate::session::models::SessionId;
use crate::session::models::SessionRecord;

/// Server-side session storage.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Look up a live session.
    ///
    /// # Returns
    /// Session record, or None when absent or expired
    ///
    /// # Errors
    /// * `Storage` - Backend operation failed
    async fn load(&self, id: &SessionId) -> Result<Option<SessionRecord>, SessionError>;

    /// Insert or replace a session.
    ///
    /// # Errors
    /// * `Storage` - Backend operation failed
    async fn save(&self, id: &SessionId, record: SessionRecord) -> Result<(), SessionError>;

    /// Remove a session. Removing an unknown id succeeds.
    ///
    /// # Errors
    /// * `Storage` - Backend operation failed
    async fn destroy(&self, id: &SessionId) -> Result<(), SessionError>;
}
