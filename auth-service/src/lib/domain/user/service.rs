use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Duration;

use crate::session::models::LogoutOutcome;
use crate::session::models::SessionId;
use crate::session::models::SessionRecord;
use crate::session::ports::SessionStore;
use crate::user::errors::AuthError;
use crate::user::models::LoginCommand;
use crate::user::models::NewUser;
use crate::user::models::PublicUser;
use crate::user::models::RegisterCommand;
use crate::user::models::Username;
use crate::user::ports::AuthServicePort;
use crate::user::ports::LoginSuccess;
use crate::user::ports::UserRepository;

/// Domain service implementation for authentication.
///
/// Concrete implementation of AuthServicePort with dependency injection.
pub struct AuthService<UR, SS>
where
    UR: UserRepository,
    SS: SessionStore,
{
    repository: Arc<UR>,
    sessions: Arc<SS>,
    authenticator: Authenticator,
    session_ttl: Duration,
}

impl<UR, SS> AuthService<UR, SS>
where
    UR: UserRepository,
    SS: SessionStore,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `sessions` - Session storage implementation
    /// * `authenticator` - Password hasher configured with the cost factor
    /// * `session_ttl` - Lifetime of sessions started by login
    pub fn new(
        repository: Arc<UR>,
        sessions: Arc<SS>,
        authenticator: Authenticator,
        session_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            sessions,
            authenticator,
            session_ttl,
        }
    }
}

#[async_trait]
impl<UR, SS> AuthServicePort for AuthService<UR, SS>
where
    UR: UserRepository,
    SS: SessionStore,
{
    async fn username_exists(&self, username: &Username) -> Result<bool, AuthError> {
        Ok(!self.repository.find_by_username(username).await?.is_empty())
    }

    async fn register(&self, command: RegisterCommand) -> Result<PublicUser, AuthError> {
        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())?;

        let user = self
            .repository
            .create(NewUser {
                username: command.username,
                password_hash,
            })
            .await?;

        tracing::info!(
            user_id = %user.id,
            username = %user.username,
            "User registered"
        );

        Ok(PublicUser::from(&user))
    }

    async fn login(
        &self,
        command: LoginCommand,
        previous: Option<SessionId>,
    ) -> Result<LoginSuccess, AuthError> {
        // The store owns uniqueness; should it ever hold duplicates, the first row wins.
        let user = self
            .repository
            .find_by_username(&command.username)
            .await?
            .into_iter()
            .next()
            .ok_or(AuthError::InvalidCredentials)?;

        self.authenticator
            .verify_credentials(&command.password, &user.password_hash)
            .map_err(|e| {
                if matches!(e, auth::AuthenticationError::InvalidCredentials) {
                    tracing::debug!(user_id = %user.id, "Password mismatch");
                }
                AuthError::from(e)
            })?;

        let public = PublicUser::from(&user);
        let session_id = SessionId::generate();
        self.sessions
            .save(&session_id, SessionRecord::new(public.clone(), self.session_ttl))
            .await?;

        if let Some(previous) = previous {
            if let Err(e) = self.sessions.destroy(&previous).await {
                tracing::warn!(error = %e, "Failed to destroy superseded session");
            }
        }

        tracing::info!(user_id = %public.id, "User logged in");

        Ok(LoginSuccess {
            session_id,
            user: public,
        })
    }

    async fn logout(&self, session_id: Option<SessionId>) -> Result<LogoutOutcome, AuthError> {
        let Some(session_id) = session_id else {
            return Ok(LogoutOutcome::NoSession);
        };

        let Some(record) = self.sessions.load(&session_id).await? else {
            return Ok(LogoutOutcome::NoSession);
        };

        match self.sessions.destroy(&session_id).await {
            Ok(()) => {
                tracing::info!(user_id = %record.user.id, "User logged out");
                Ok(LogoutOutcome::LoggedOut)
            }
            Err(e) => {
                tracing::error!(
                    user_id = %record.user.id,
                    error = %e,
                    "Failed to destroy session"
                );
                Ok(LogoutOutcome::Failed(e))
            }
        }
    }
}
