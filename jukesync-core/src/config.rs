use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JukesyncConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub stream: StreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the jukebox server, e.g. `http://raspberrypi.local`
    pub url: String,
    /// Path of the playback state endpoint, relative to the base URL
    #[serde(default = "default_state_path")]
    pub state_path: String,
    /// Polling interval in milliseconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

fn default_state_path() -> String {
    "/state".into()
}

const fn default_poll_interval() -> u64 {
    500
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Start with local streaming enabled instead of muted
    #[serde(default)]
    pub active_on_start: bool,
}

impl JukesyncConfig {
    /// Get the configuration directory path (~/.config/jukesync/)
    #[must_use]
    pub fn config_dir() -> PathBuf {
        crate::paths::config_dir()
    }

    /// Get the config file path (~/.config/jukesync/config.toml)
    #[must_use]
    pub fn config_path() -> PathBuf {
        crate::paths::config_path()
    }

    /// Load config from file or create template on first run
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read, parsed, or if
    /// required fields are missing.
    pub fn load_or_create() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            // Create config directory if it doesn't exist
            if let Some(parent) = config_path.parent() {
                fs::create_dir_all(parent)?;
            }

            // Write template config
            fs::write(&config_path, CONFIG_TEMPLATE)?;

            return Err(CoreError::ConfigNotFound { path: config_path });
        }

        let content = fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Validate that required fields are present.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing or empty.
    pub fn validate(&self) -> Result<()> {
        if self.server.url.is_empty() {
            return Err(CoreError::ConfigMissingField {
                field: "server.url".into(),
            });
        }
        if self.server.poll_interval_ms == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "server.poll_interval_ms must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

const CONFIG_TEMPLATE: &str = r#"# Jukesync Configuration
# ~/.config/jukesync/config.toml

[server]
# Required: base URL of your jukebox server
url = ""
# Playback state endpoint, relative to the base URL
state_path = "/state"
poll_interval_ms = 500

[stream]
# Start with local streaming enabled instead of muted
active_on_start = false
"#;
