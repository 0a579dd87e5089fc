use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Default location checked when no config path is given.
pub const DEFAULT_CONFIG_PATH: &str = "Client.toml";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the game server.
    pub server_url: String,
    /// Realtime namespace the match lives on.
    pub namespace: String,
    /// Hide a lobby row as soon as the user asks to remove it, before the
    /// server confirms.
    pub predict_removals: bool,
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".to_string(),
            namespace: "/chess-game".to_string(),
            predict_removals: false,
            log_filter: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load from `path`, or from `Client.toml` when it exists.
    ///
    /// An explicit path must exist; the implicit one falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_PATH))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Full address of the match namespace.
    pub fn channel_url(&self) -> String {
        format!(
            "{}/{}",
            self.server_url.trim_end_matches('/'),
            self.namespace.trim_start_matches('/')
        )
    }
}
