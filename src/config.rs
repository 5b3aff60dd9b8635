use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Address and port the HTTP server binds to.
    #[serde(default = "Config::default_listen_addr")]
    pub listen_addr: String,
    /// SQLite connection string.
    #[serde(default = "Config::default_database_url")]
    pub database_url: String,
    /// Shared secret checked by POST /admin/login.
    pub admin_password: String,
    /// Allowed CORS origins. Required unless cors_permissive is true.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Explicitly allow all origins (development only). Defaults to false.
    #[serde(default)]
    pub cors_permissive: bool,
}

impl Config {
    fn default_listen_addr() -> String {
        "0.0.0.0:3000".to_string()
    }

    fn default_database_url() -> String {
        "sqlite:database/transit.db?mode=rwc".to_string()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse config: {0}")]
    ParseError(String),
}
