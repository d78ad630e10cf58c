use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Checked-in data directory (primary location)
    pub data_dir: PathBuf,
    /// Writable directory used when `data_dir` rejects writes
    pub fallback_dir: PathBuf,
    pub cache_ttl_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    pub admin_secret: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            fallback_dir: std::env::temp_dir(),
            cache_ttl_ms: 5000,
        }
    }
}

impl StorageConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional config file and environment variables
    pub fn load() -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Add default configuration
        config = config.add_source(config::Config::try_from(&AppConfig::default())?);

        // Add config file if it exists
        config = config.add_source(config::File::with_name("config").required(false));

        // Environment variables like CATALOG_SERVER__PORT=8080
        config = config.add_source(
            config::Environment::with_prefix("CATALOG")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = config.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        Ok(app_config)
    }

    /// Admin bearer secret from config or the `ADMIN_SECRET` environment variable.
    /// Blank values count as unset.
    pub fn admin_secret(&self) -> Option<String> {
        let non_blank = |secret: &String| !secret.trim().is_empty();
        self.auth
            .admin_secret
            .clone()
            .filter(non_blank)
            .or_else(|| std::env::var("ADMIN_SECRET").ok().filter(non_blank))
    }

    /// Get the server bind address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
