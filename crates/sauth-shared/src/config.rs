//! Configuration management

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{DEFAULT_API_HOST, DEFAULT_API_PORT, DEFAULT_SESSION_DURATION, DEFAULT_SESSION_NAME};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub session: SessionSettings,
    pub storage: StorageSettings,
    pub auth: AuthSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

/// Session cookie and lifetime settings
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    /// Name of the cookie carrying the session id
    pub name: String,
    /// Lifetime in seconds; zero or negative means sessions never expire
    pub duration: i64,
}

impl SessionSettings {
    pub fn new(name: impl Into<String>, duration: i64) -> Self {
        Self { name: name.into(), duration }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_NAME, DEFAULT_SESSION_DURATION)
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    File,
    Postgres,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// Directory holding the `.db_<Type>.json` files
    pub data_dir: String,
    pub database_url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    /// Paths served without authentication; entries may use `*` wildcards
    pub excluded_paths: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub directory: Option<String>,
    pub file_prefix: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::load_with(env_var)
    }

    /// Load with plain variables (`APP_ENV`, `SESSION_NAME`, ...) read through `var`.
    fn load_with<F>(var: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = var("APP_ENV").unwrap_or_else(|| "development".into());
        let config = Self::builder_with_defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("APP").separator("__").try_parsing(true))
            // Plain variables understood by earlier deployments win over everything else
            .set_override_option("session.name", var("SESSION_NAME"))?
            .set_override_option(
                "session.duration",
                var("SESSION_DURATION").map(|raw| parse_session_duration(Some(&raw))),
            )?
            .set_override_option("app.host", var("API_HOST"))?
            .set_override_option("app.port", var("API_PORT").and_then(|p| p.parse::<i64>().ok()))?
            .build()?;
        Ok(config.try_deserialize()?)
    }

    fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", DEFAULT_API_HOST)?
            .set_default("app.port", i64::from(DEFAULT_API_PORT))?
            .set_default("app.name", "sauth-server")?
            .set_default("session.name", DEFAULT_SESSION_NAME)?
            .set_default("session.duration", DEFAULT_SESSION_DURATION)?
            .set_default("storage.backend", "file")?
            .set_default("storage.data_dir", ".")?
            .set_default("storage.max_connections", 5)?
            .set_default("auth.excluded_paths", default_excluded_paths())?
            .set_default("log.file_prefix", "sauth-server")
    }
}

pub fn default_excluded_paths() -> Vec<String> {
    [
        "/api/v1/status/",
        "/api/v1/unauthorized/",
        "/api/v1/forbidden/",
        "/api/v1/auth_session/*",
    ]
    .iter()
    .map(|p| p.to_string())
    .collect()
}

/// Parses a session lifetime in seconds. Missing or malformed values yield 0.
pub fn parse_session_duration(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(DEFAULT_SESSION_DURATION)
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
