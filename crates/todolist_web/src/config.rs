//! Server configuration loaded from environment variables.
//!
//! # Invariants
//! - Empty or whitespace-only variables count as unset.
//! - A configured session secret is at least `MIN_SESSION_SECRET_BYTES` long.

use axum_extra::extract::cookie::Key;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const ENV_BIND_ADDR: &str = "TODOLIST_BIND_ADDR";
pub const ENV_LOG_LEVEL: &str = "TODOLIST_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "TODOLIST_LOG_DIR";
pub const ENV_SESSION_SECRET: &str = "TODOLIST_SESSION_SECRET";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:4567";
/// Cookie encryption key material must be at least 512 bits.
pub const MIN_SESSION_SECRET_BYTES: usize = 64;

#[derive(Debug)]
pub enum ConfigError {
    InvalidBindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    SecretTooShort {
        len: usize,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBindAddr { value, source } => {
                write!(f, "invalid {ENV_BIND_ADDR} `{value}`: {source}")
            }
            Self::SecretTooShort { len } => write!(
                f,
                "{ENV_SESSION_SECRET} has {len} bytes; at least {MIN_SESSION_SECRET_BYTES} required"
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidBindAddr { source, .. } => Some(source),
            Self::SecretTooShort { .. } => None,
        }
    }
}

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// One of `trace|debug|info|warn|error`; checked by logging init.
    pub log_level: String,
    /// Absolute log directory; `None` logs to stderr.
    pub log_dir: Option<String>,
    /// Cookie key material; `None` generates a per-process key.
    pub session_secret: Option<String>,
}

impl ServerConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind_raw = read(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_raw
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: bind_raw.clone(),
                source,
            })?;

        let session_secret = read(ENV_SESSION_SECRET);
        if let Some(secret) = &session_secret {
            if secret.len() < MIN_SESSION_SECRET_BYTES {
                return Err(ConfigError::SecretTooShort { len: secret.len() });
            }
        }

        Ok(Self {
            bind_addr,
            log_level: read(ENV_LOG_LEVEL)
                .unwrap_or_else(|| todolist_core::default_log_level().to_string()),
            log_dir: read(ENV_LOG_DIR),
            session_secret,
        })
    }

    /// Builds the cookie key from the configured secret, or generates one.
    ///
    /// A generated key lives only as long as the process, so sessions do
    /// not survive a restart.
    pub fn session_key(&self) -> Result<Key, ConfigError> {
        match &self.session_secret {
            Some(secret) => Key::try_from(secret.as_bytes())
                .map_err(|_| ConfigError::SecretTooShort { len: secret.len() }),
            None => {
                warn!(
                    "event=session_key module=web status=generated reason=no_{}",
                    ENV_SESSION_SECRET.to_ascii_lowercase()
                );
                Ok(Key::generate())
            }
        }
    }
}
