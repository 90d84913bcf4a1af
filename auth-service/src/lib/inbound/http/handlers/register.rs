use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::Password;
use crate::domain::user::models::PublicUser;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Username;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::middleware::Credentials;
use crate::inbound::http::router::AppState;
use crate::user::errors::AuthError;

/// `POST /register`. Runs after `check_username_free` and `check_password_length`.
pub async fn register(
    State(state): State<AppState>,
    Extension(credentials): Extension<Credentials>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    state
        .auth_service
        .register(try_into_command(credentials)?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

fn try_into_command(credentials: Credentials) -> Result<RegisterCommand, AuthError> {
    let username = Username::new(credentials.username)?;
    let password = Password::new(credentials.password)?;
    Ok(RegisterCommand::new(username, password))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub user_id: i64,
    pub username: String,
}

impl From<&PublicUser> for RegisterResponseData {
    fn from(user: &PublicUser) -> Self {
        Self {
            user_id: user.id.0,
            username: user.username.as_str().to_string(),
        }
    }
}
