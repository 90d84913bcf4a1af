use std::env;
use std::path::Path;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub password: PasswordConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    #[serde(default = "default_mount_path")]
    pub mount_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

/// Where user records and sessions live.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    /// Argon2 time cost; the brute-force work factor.
    #[serde(default = "default_hash_cost")]
    pub hash_cost: u32,
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: i64,
    #[serde(default)]
    pub secure: bool,
    /// Status sent with "error while logging out". 200 keeps the historical contract.
    #[serde(default = "default_logout_failure_status")]
    pub logout_failure_status: u16,
}

fn default_mount_path() -> String {
    "/api/auth".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_hash_cost() -> u32 {
    auth::PasswordHasher::DEFAULT_COST
}

fn default_memory_kib() -> u32 {
    auth::PasswordHasher::DEFAULT_MEMORY_KIB
}

fn default_cookie_name() -> String {
    "sid".to_string()
}

fn default_ttl_seconds() -> i64 {
    3600
}

fn default_logout_failure_status() -> u16 {
    200
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            hash_cost: default_hash_cost(),
            memory_kib: default_memory_kib(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            ttl_seconds: default_ttl_seconds(),
            secure: false,
            logout_failure_status: default_logout_failure_status(),
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, SESSION__COOKIE_NAME, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Same as [`Config::load`], reading the files from `dir`.
    pub fn load_from(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name(&dir.join("default").to_string_lossy()).required(false))
            .add_source(File::with_name(&dir.join(&run_mode).to_string_lossy()).required(false))
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Self = configuration.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let status = self.session.logout_failure_status;
        if !(100..=599).contains(&status) {
            return Err(ConfigError::Message(format!(
                "session.logout_failure_status must be between 100 and 599, got {}",
                status
            )));
        }
        Ok(())
    }
}
