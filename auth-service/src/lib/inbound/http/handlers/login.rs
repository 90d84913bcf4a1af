use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Extension;
use axum_extra::extract::CookieJar;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::Username;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::middleware::Credentials;
use crate::inbound::http::router::AppState;
use crate::user::errors::AuthError;

/// `POST /login`. Runs after `check_username_exists`.
///
/// The password is checked here rather than in a guard, so an unknown user and
/// a wrong password produce the same 401.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Extension(credentials): Extension<Credentials>,
) -> Result<Response, ApiError> {
    let username =
        Username::new(credentials.username).map_err(|_| AuthError::InvalidCredentials)?;
    let previous = state.cookies.session_id(&jar);

    let success = state
        .auth_service
        .login(LoginCommand::new(username, credentials.password), previous)
        .await?;

    let jar = state.cookies.issue(jar, &success.session_id);

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            MessageData::new(format!("welcome {}", success.user.username)),
        ),
    )
        .into_response())
}
