//! CLI configuration management.
//!
//! Persists the server URL and session credentials to `~/.storecast/config.json`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use storecast_core::Session;

/// Server URL used when none is configured.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";

/// Persistent CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CliConfig {
    /// Server URL (e.g., "http://127.0.0.1:8080").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
    /// Session from the last login.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionConfig>,
}

/// Stored session credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub user_id: String,
    pub email: String,
    pub token: String,
    pub expires_at: i64,
}

impl SessionConfig {
    /// The identity the submission workflow runs under.
    pub fn as_session(&self) -> Session {
        Session {
            user_id: self.user_id.clone(),
            email: self.email.clone(),
            token: self.token.clone(),
        }
    }
}

impl CliConfig {
    /// Path to the config directory: `~/.storecast/`.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".storecast"))
    }

    /// Path to the config file: `~/.storecast/config.json`.
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.json"))
    }

    /// Load config from disk. Returns default if file doesn't exist or is invalid.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let dir =
            Self::config_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
        std::fs::create_dir_all(&dir)?;
        let path = dir.join("config.json");
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Clear stored session credentials.
    pub fn clear_session(&mut self) {
        self.session = None;
    }

    /// Server URL to use: the configured one, or the local default.
    pub fn effective_server_url(&self) -> &str {
        self.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }
}
