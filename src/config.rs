//! Application configuration.
//!
//! Precedence, lowest to highest: built-in defaults, an optional TOML file,
//! then `TASKDECK_*` environment variables. The config is loaded once at
//! startup and handed to the server; nothing reads the environment after
//! that.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

// Environment variable names
pub const ENV_HOST: &str = "TASKDECK_HOST";
pub const ENV_PORT: &str = "TASKDECK_PORT";
pub const ENV_DATABASE_URL: &str = "TASKDECK_DATABASE_URL";
pub const ENV_JWT_SECRET: &str = "TASKDECK_JWT_SECRET";
pub const ENV_TOKEN_EXPIRY_MINUTES: &str = "TASKDECK_TOKEN_EXPIRY_MINUTES";
pub const ENV_MIN_PASSWORD_LEN: &str = "TASKDECK_MIN_PASSWORD_LEN";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub token_expiry_minutes: i64,
    pub min_password_len: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_url: "sqlite:taskdeck.db".to_string(),
            jwt_secret: "taskdeck-dev-secret-change-in-production".to_string(),
            token_expiry_minutes: 60,
            min_password_len: 8,
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the TOML file at `path` (if given),
    /// then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    Error::Config(format!("cannot read {}: {e}", path.display()))
                })?;
                toml::from_str(&raw)
                    .map_err(|e| Error::Config(format!("cannot parse {}: {e}", path.display())))?
            }
            None => Self::default(),
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var(ENV_HOST) {
            self.host = host;
        }
        if let Ok(port) = std::env::var(ENV_PORT) {
            self.port = port
                .parse()
                .map_err(|_| Error::Config(format!("invalid {ENV_PORT}: {port:?}")))?;
        }
        if let Ok(url) = std::env::var(ENV_DATABASE_URL) {
            self.database_url = url;
        }
        if let Ok(secret) = std::env::var(ENV_JWT_SECRET) {
            self.jwt_secret = secret;
        }
        if let Ok(expiry) = std::env::var(ENV_TOKEN_EXPIRY_MINUTES) {
            self.token_expiry_minutes = expiry
                .parse()
                .map_err(|_| Error::Config(format!("invalid {ENV_TOKEN_EXPIRY_MINUTES}: {expiry:?}")))?;
        }
        if let Ok(len) = std::env::var(ENV_MIN_PASSWORD_LEN) {
            self.min_password_len = len
                .parse()
                .map_err(|_| Error::Config(format!("invalid {ENV_MIN_PASSWORD_LEN}: {len:?}")))?;
        }
        Ok(())
    }
}
