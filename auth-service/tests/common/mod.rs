use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth_service::domain::session::errors::SessionError;
use auth_service::domain::session::models::SessionId;
use auth_service::domain::session::models::SessionRecord;
use auth_service::domain::session::ports::SessionStore;
use auth_service::domain::user::service::AuthService;
use auth_service::inbound::http::cookies::SessionCookies;
use auth_service::inbound::http::router::create_router;
use auth_service::inbound::http::router::HttpSettings;
use auth_service::outbound::repositories::InMemoryUserRepository;
use auth_service::outbound::sessions::InMemorySessionStore;
use axum::http::StatusCode;
use chrono::Duration;

pub const MOUNT_PATH: &str = "/api/auth";

/// Test application that spawns a real server over in-memory stores
pub struct TestApp {
    pub address: String,
    pub users: Arc<InMemoryUserRepository>,
    pub authenticator: Authenticator,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with(Arc::new(InMemorySessionStore::new()), StatusCode::OK).await
    }

    /// Spawn with a custom session store and logout failure status
    pub async fn spawn_with<SS: SessionStore>(
        sessions: Arc<SS>,
        logout_failure_status: StatusCode,
    ) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let users = Arc::new(InMemoryUserRepository::new());
        // Cheap parameters keep the suite fast; production cost comes from config.
        let authenticator =
            Authenticator::with_cost(1, 1024).expect("Failed to create authenticator");

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&users),
            sessions,
            authenticator.clone(),
            Duration::hours(1),
        ));

        let settings = HttpSettings {
            mount_path: MOUNT_PATH.to_string(),
            cookies: SessionCookies::new("sid", 3600, false),
            logout_failure_status,
        };
        let router = create_router(auth_service, settings);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            users,
            authenticator,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub async fn register(&self, username: &str, password: &str) -> reqwest::Response {
        self.post(&format!("{}/register", MOUNT_PATH))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post(&format!("{}/login", MOUNT_PATH))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn logout(&self) -> reqwest::Response {
        self.get(&format!("{}/logout", MOUNT_PATH))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// Session store whose destroy always fails.
#[derive(Default)]
pub struct FailingDestroySessionStore {
    inner: InMemorySessionStore,
}

#[async_trait]
impl SessionStore for FailingDestroySessionStore {
    async fn load(&self, id: &SessionId) -> Result<Option<SessionRecord>, SessionError> {
        self.inner.load(id).await
    }

    async fn save(&self, id: &SessionId, record: SessionRecord) -> Result<(), SessionError> {
        self.inner.save(id, record).await
    }

    async fn destroy(&self, _id: &SessionId) -> Result<(), SessionError> {
        Err(SessionError::Storage("store unavailable".to_string()))
    }
}
