//! Request guards.
//!
//! Each guard inspects the [`Credentials`] placed in the request extensions by
//! [`extract_credentials`] and either short-circuits with an error response or
//! forwards to the next stage. Routes layer them in order; see the router.

use std::fmt;

use axum::body::Body;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;
use axum::Extension;
use serde::Deserialize;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::user::errors::AuthError;
use crate::user::models::Password;
use crate::user::models::Username;

const MAX_BODY_BYTES: usize = 64 * 1024;

/// Username and password from the JSON request body.
///
/// Missing fields read as empty strings.
#[derive(Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Parse the JSON body into [`Credentials`] for the guards and handler downstream.
pub async fn extract_credentials(req: Request, next: Next) -> Result<Response, ApiError> {
    let (parts, body) = req.into_parts();

    let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| {
            tracing::debug!(error = %e, "Unreadable request body");
            ApiError::BadRequest("Unreadable request body".to_string())
        })?;

    let credentials: Credentials = serde_json::from_slice(&bytes).map_err(|e| {
        tracing::debug!(error = %e, "Rejected request body");
        ApiError::BadRequest("Malformed request body".to_string())
    })?;

    let mut req = Request::from_parts(parts, Body::empty());
    req.extensions_mut().insert(credentials);

    Ok(next.run(req).await)
}

/// Reject registration of a username that already has a record.
pub async fn check_username_free(
    State(state): State<AppState>,
    Extension(credentials): Extension<Credentials>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let username = Username::new(credentials.username).map_err(AuthError::from)?;

    if state.auth_service.username_exists(&username).await? {
        tracing::debug!(username = %username, "Registration rejected: username taken");
        return Err(AuthError::UsernameTaken(username.to_string()).into());
    }

    Ok(next.run(req).await)
}

/// Reject login for a username with no record.
///
/// Answers with the same 401 as a wrong password.
pub async fn check_username_exists(
    State(state): State<AppState>,
    Extension(credentials): Extension<Credentials>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let username =
        Username::new(credentials.username).map_err(|_| AuthError::InvalidCredentials)?;

    if !state.auth_service.username_exists(&username).await? {
        return Err(AuthError::InvalidCredentials.into());
    }

    Ok(next.run(req).await)
}

/// Reject passwords shorter than [`Password::MIN_LENGTH`].
pub async fn check_password_length(
    Extension(credentials): Extension<Credentials>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    Password::new(credentials.password).map_err(AuthError::from)?;

    Ok(next.run(req).await)
}
