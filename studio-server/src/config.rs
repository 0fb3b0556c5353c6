//! `studio.toml` loading.
//!
//! Every section and key is optional. A missing file falls back to the
//! defaults, except when the path was given explicitly.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use studio_core::db::DbConfig;
use studio_mailer::MailerConfig;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "studio.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid bind address '{0}'")]
    Bind(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: String,
    /// Upper bound on storing and notifying one contact submission.
    /// Unset or `0` means no bound.
    pub submission_timeout_secs: Option<u64>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            submission_timeout_secs: Some(15),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive. `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Append log records to this file as well as stdout.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ServerSection,
    pub database: DbConfig,
    pub mail: MailerConfig,
    pub logging: LoggingConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: ServerSection::default(),
            database: DbConfig {
                backend: "sqlite".to_string(),
                connection_string: "studio.db".to_string(),
            },
            mail: MailerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `path`, or from `studio.toml` in the working
    /// directory when no path is given.
    ///
    /// An explicitly requested file must exist. The implicit one may be
    /// absent, in which case the defaults are returned.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let implicit = Path::new(DEFAULT_CONFIG_FILE);
                if implicit.is_file() {
                    Self::from_file(implicit)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply command-line overrides on top of the file values.
    pub fn with_overrides(
        mut self,
        bind: Option<String>,
        db: Option<String>,
    ) -> Self {
        if let Some(bind) = bind {
            self.server.bind = bind;
        }
        if let Some(db) = db {
            self.database.connection_string = db;
        }
        self
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .bind
            .parse()
            .map_err(|_| ConfigError::Bind(self.server.bind.clone()))
    }

    pub fn submission_timeout(&self) -> Option<Duration> {
        self.server
            .submission_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}
