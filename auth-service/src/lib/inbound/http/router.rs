use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::status::InvalidStatusCode;
use axum::http::Request;
use axum::http::Response;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::cookies::SessionCookies;
use super::handlers::health::health;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::register::register;
use super::middleware::check_password_length;
use super::middleware::check_username_exists;
use super::middleware::check_username_free;
use super::middleware::extract_credentials;
use crate::config::Config;
use crate::domain::user::ports::AuthServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub cookies: SessionCookies,
    pub logout_failure_status: StatusCode,
}

/// HTTP-facing settings derived from configuration.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub mount_path: String,
    pub cookies: SessionCookies,
    pub logout_failure_status: StatusCode,
}

impl HttpSettings {
    /// # Errors
    /// * `InvalidStatusCode` - `session.logout_failure_status` is not a valid HTTP status
    pub fn from_config(config: &Config) -> Result<Self, InvalidStatusCode> {
        Ok(Self {
            mount_path: config.server.mount_path.clone(),
            cookies: SessionCookies::from_config(&config.session),
            logout_failure_status: StatusCode::from_u16(config.session.logout_failure_status)?,
        })
    }
}

pub fn create_router(auth_service: Arc<dyn AuthServicePort>, settings: HttpSettings) -> Router {
    let state = AppState {
        auth_service,
        cookies: settings.cookies,
        logout_failure_status: settings.logout_failure_status,
    };

    // Layers wrap outward: the last one added runs first.
    let auth_routes = Router::new()
        .route(
            "/register",
            post(register)
                .layer(middleware::from_fn(check_password_length))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    check_username_free,
                ))
                .layer(middleware::from_fn(extract_credentials)),
        )
        .route(
            "/login",
            post(login)
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    check_username_exists,
                ))
                .layer(middleware::from_fn(extract_credentials)),
        )
        .route("/logout", get(logout));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    let mount_path = settings.mount_path.trim_end_matches('/');
    let router = Router::new().route("/health", get(health));
    let router = if mount_path.is_empty() {
        router.merge(auth_routes)
    } else {
        router.nest(mount_path, auth_routes)
    };

    router
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
