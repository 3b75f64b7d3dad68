//! Server configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Environment variable that overrides the configured API token.
pub const TOKEN_ENV_VAR: &str = "FOOTFALL_API_TOKEN";

/// Configuration for the analytics server and importer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Path to the SQLite database file. Default: "footfall.db".
    pub database_path: Option<PathBuf>,
    /// Address the HTTP server binds to. Default: "127.0.0.1:8080".
    pub bind_addr: Option<String>,
    /// Directory holding static documents (the summary JSON). Default: "static".
    pub static_dir: Option<PathBuf>,
    /// Number of read-only connections in the pool. 0 = pool default.
    pub read_pool_size: Option<usize>,
    /// Bearer token required on every API request.
    /// `FOOTFALL_API_TOKEN` takes precedence when set.
    pub api_token: Option<String>,
}

impl ServerConfig {
    /// Load configuration from a TOML file, then apply environment overrides.
    ///
    /// A missing file is not an error — defaults apply.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str(&raw).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        } else {
            Self::default()
        };

        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            if !token.is_empty() {
                config.api_token = Some(token);
            }
        }

        Ok(config)
    }

    /// Returns the effective database path, defaulting to "footfall.db".
    pub fn effective_database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("footfall.db"))
    }

    /// Returns the effective bind address, defaulting to "127.0.0.1:8080".
    pub fn effective_bind_addr(&self) -> String {
        self.bind_addr
            .clone()
            .unwrap_or_else(|| "127.0.0.1:8080".to_string())
    }

    /// Returns the effective static directory, defaulting to "static".
    pub fn effective_static_dir(&self) -> PathBuf {
        self.static_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("static"))
    }

    /// Returns the effective read pool size, defaulting to 0 (pool default).
    pub fn effective_read_pool_size(&self) -> usize {
        self.read_pool_size.unwrap_or(0)
    }

    /// Returns the configured API token, or `MissingToken` when absent.
    ///
    /// The server refuses to start without one.
    pub fn require_api_token(&self) -> Result<&str, ConfigError> {
        self.api_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)
    }
}
