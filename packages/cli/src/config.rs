use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Base URL of the platform API, e.g. `http://localhost:8080/api`.
    pub base_url: String,
    /// Request timeout in seconds. Bounds run/submit round trips.
    pub timeout_secs: u64,
    /// Bearer token for authenticated endpoints.
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageConfig {
    /// Override for the storage file location. Defaults to the platform
    /// data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.base_url", "http://localhost:8080/api")?
            .set_default("server.timeout_secs", 30)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., LOCALCODE__SERVER__BASE_URL)
            .add_source(Environment::with_prefix("LOCALCODE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
