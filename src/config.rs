//! Server configuration.
//!
//! Values are layered: built-in defaults, then an optional YAML file, then the
//! `LISTEN` environment variable, then command-line flags (see [`crate::cli`]).
//!
//! ```yaml
//! server:
//!   listen_addr: "0.0.0.0:4221"
//!   backlog: 5
//!   max_request_size: 1024
//! files:
//!   enabled: true
//!   directory: /tmp
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:4221";
pub const DEFAULT_BACKLOG: i32 = 5;
pub const DEFAULT_MAX_REQUEST_SIZE: usize = 1024;
pub const DEFAULT_DIRECTORY: &str = "/tmp";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub files: FilesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Pending-connection queue length passed to `listen(2)`.
    pub backlog: i32,
    /// Largest request (head and body) accepted; larger ones get 413.
    pub max_request_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// When false the `/files/` route is not installed at all.
    pub enabled: bool,
    pub directory: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            backlog: DEFAULT_BACKLOG,
            max_request_size: DEFAULT_MAX_REQUEST_SIZE,
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: PathBuf::from(DEFAULT_DIRECTORY),
        }
    }
}

impl Config {
    /// Defaults with the environment applied.
    pub fn load() -> Self {
        let mut cfg = Self::default();
        cfg.apply_env();
        cfg
    }

    /// Reads a YAML file, then applies the environment and validates.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut cfg = Self::from_yaml_str(&content)?;
        cfg.apply_env();
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    fn apply_env(&mut self) {
        if let Ok(addr) = std::env::var("LISTEN") {
            self.server.listen_addr = addr;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server
            .listen_addr
            .parse::<SocketAddr>()
            .map_err(|e| {
                ConfigError::Invalid(format!("listen_addr {:?}: {}", self.server.listen_addr, e))
            })?;

        if self.server.backlog <= 0 {
            return Err(ConfigError::Invalid("backlog must be positive".into()));
        }

        if self.server.max_request_size == 0 {
            return Err(ConfigError::Invalid("max_request_size must be positive".into()));
        }

        Ok(())
    }
}
