use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::session::errors::SessionError;
use crate::session::models::SessionId;
use crate::session::models::SessionRecord;
use crate::session::ports::SessionStore;

/// Process-local session store.
///
/// Expired records are dropped lazily when read.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, SessionRecord>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, id: &SessionId) -> Result<Option<SessionRecord>, SessionError> {
        let record = self.sessions.read().await.get(id).cloned();

        match record {
            Some(record) if record.is_expired_at(Utc::now()) => {
                self.sessions.write().await.remove(id);
                Ok(None)
            }
            other => Ok(other),
        }
    }

    async fn save(&self, id: &SessionId, record: SessionRecord) -> Result<(), SessionError> {
        self.sessions.write().await.insert(id.clone(), record);
        Ok(())
    }

    async fn destroy(&self, id: &SessionId) -> Result<(), SessionError> {
        self.sessions.write().await.remove(id);
        Ok(())
    }
}
