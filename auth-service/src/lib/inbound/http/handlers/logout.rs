use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::domain::session::models::LogoutOutcome;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// `GET /logout`. No guards.
///
/// A failed destroy answers with the configured `logout_failure_status` (200 by default).
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Result<Response, ApiError> {
    let session_id = state.cookies.session_id(&jar);
    let presented_cookie = session_id.is_some();

    let outcome = state.auth_service.logout(session_id).await?;

    let (status, message, clear_cookie) = match outcome {
        LogoutOutcome::NoSession => (StatusCode::OK, "no session", presented_cookie),
        LogoutOutcome::LoggedOut => (StatusCode::OK, "logged out", true),
        LogoutOutcome::Failed(_) => (
            state.logout_failure_status,
            "error while logging out",
            false,
        ),
    };

    let body = ApiSuccess::new(status, MessageData::new(message));

    if !clear_cookie {
        return Ok(body.into_response());
    }

    Ok((state.cookies.clear(jar), body).into_response())
}
