use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::session::errors::SessionError;
use crate::session::models::SessionId;
use crate::session::models::SessionRecord;
use crate::session::ports::SessionStore;
use crate::user::models::PublicUser;
use crate::user::models::UserId;
use crate::user::models::Username;

pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Delete every expired session.
    ///
    /// # Returns
    /// Number of rows removed
    pub async fn purge_expired(&self) -> Result<u64, SessionError> {
        sqlx::query("DELETE FROM sessions WHERE expires_at <= now()")
            .execute(&self.pool)
            .await
            .map(|result| result.rows_affected())
            .map_err(|e| SessionError::Storage(e.to_string()))
    }
}

#[derive(Debug, FromRow)]
struct SessionRow {
    user_id: i64,
    username: String,
    expires_at: DateTime<Utc>,
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn load(&self, id: &SessionId) -> Result<Option<SessionRecord>, SessionError> {
        let row: Option<SessionRow> = sqlx::query_as(
            r#"
            SELECT user_id, username, expires_at
            FROM sessions
            WHERE id = $1 AND expires_at > now()
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| SessionError::Storage(e.to_string()))?;

        row.map(|r| {
            let username =
                Username::new(r.username).map_err(|e| SessionError::Corrupt(e.to_string()))?;
            Ok(SessionRecord {
                user: PublicUser {
                    id: UserId(r.user_id),
                    username,
                },
                expires_at: r.expires_at,
            })
        })
        .transpose()
    }

    async fn save(&self, id: &SessionId, record: SessionRecord) -> Result<(), SessionError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (id, user_id, username, expires_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET user_id = EXCLUDED.user_id,
                username = EXCLUDED.username,
                expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(id.as_str())
        .bind(record.user.id.0)
        .bind(record.user.username.as_str())
        .bind(record.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| SessionError::Storage(e.to_string()))?;

        Ok(())
    }

    async fn destroy(&self, id: &SessionId) -> Result<(), SessionError> {
        sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| SessionError::Storage(e.to_string()))?;

        Ok(())
    }
}
