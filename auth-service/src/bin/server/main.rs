use std::sync::Arc;
use std::time::Duration as StdDuration;

use auth::Authenticator;
use auth_service::config::Config;
use auth_service::config::StorageBackend;
use auth_service::domain::user::ports::AuthServicePort;
use auth_service::domain::user::service::AuthService;
use auth_service::inbound::http::router::create_router;
use auth_service::inbound::http::router::HttpSettings;
use auth_service::outbound::repositories::InMemoryUserRepository;
use auth_service::outbound::repositories::PostgresUserRepository;
use auth_service::outbound::sessions::InMemorySessionStore;
use auth_service::outbound::sessions::PostgresSessionStore;
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const SESSION_PURGE_INTERVAL: StdDuration = StdDuration::from_secs(600);

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        mount_path = %config.server.mount_path,
        storage = ?config.storage.backend,
        hash_cost = config.password.hash_cost,
        session_ttl_seconds = config.session.ttl_seconds,
        "Configuration loaded"
    );

    let authenticator =
        Authenticator::with_cost(config.password.hash_cost, config.password.memory_kib)?;
    let session_ttl = Duration::seconds(config.session.ttl_seconds);

    let auth_service: Arc<dyn AuthServicePort> = match config.storage.backend {
        StorageBackend::Postgres => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let sessions = Arc::new(PostgresSessionStore::new(pg_pool.clone()));
            spawn_session_purge(Arc::clone(&sessions));

            Arc::new(AuthService::new(
                Arc::new(PostgresUserRepository::new(pg_pool)),
                sessions,
                authenticator,
                session_ttl,
            ))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; users and sessions are lost on restart");
            Arc::new(AuthService::new(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemorySessionStore::new()),
                authenticator,
                session_ttl,
            ))
        }
    };

    let http_application = create_router(auth_service, HttpSettings::from_config(&config)?);

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

fn spawn_session_purge(sessions: Arc<PostgresSessionStore>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_PURGE_INTERVAL);
        loop {
            interval.tick().await;
            match sessions.purge_expired().await {
                Ok(0) => {}
                Ok(purged) => tracing::debug!(purged, "Expired sessions purged"),
                Err(e) => tracing::warn!(error = %e, "Session purge failed"),
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
