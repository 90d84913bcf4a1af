use async_trait::async_trait;

use crate::session::models::LogoutOutcome;
use crate::session::models::SessionId;
use crate::user::errors::AuthError;
use crate::user::models::LoginCommand;
use crate::user::models::NewUser;
use crate::user::models::PublicUser;
use crate::user::models::RegisterCommand;
use crate::user::models::User;
use crate::user::models::Username;

/// Outcome of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSuccess {
    pub session_id: SessionId,
    pub user: PublicUser,
}

/// Port for authentication domain operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Check whether any user record holds this username.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn username_exists(&self, username: &Username) -> Result<bool, AuthError>;

    /// Hash the password and persist a new user.
    ///
    /// # Returns
    /// Public projection of the created user
    ///
    /// # Errors
    /// * `UsernameTaken` - Store rejected the insert on its uniqueness constraint
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<PublicUser, AuthError>;

    /// Verify credentials and start a new session.
    ///
    /// A previous session presented with the request is destroyed best-effort.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `Session` - New session could not be stored
    /// * `DatabaseError` - Database operation failed
    async fn login(
        &self,
        command: LoginCommand,
        previous: Option<SessionId>,
    ) -> Result<LoginSuccess, AuthError>;

    /// Destroy the session, if one is live.
    ///
    /// Destroy failures are reported in the outcome, not as errors.
    ///
    /// # Errors
    /// * `Session` - Session lookup failed
    async fn logout(&self, session_id: Option<SessionId>) -> Result<LogoutOutcome, AuthError>;
}

/// Persistence operations for user records.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Atomically insert a new user; the store assigns the id.
    ///
    /// # Errors
    /// * `UsernameTaken` - Username uniqueness constraint violated
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, AuthError>;

    /// Retrieve users by username.
    ///
    /// # Returns
    /// Matching users (empty if none)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Vec<User>, AuthError>;
}
