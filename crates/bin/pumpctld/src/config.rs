//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `pumpctl.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use chrono::FixedOffset;
use serde::Deserialize;

/// Largest offset from UTC accepted for the local time of day.
const MAX_OFFSET_MINUTES: i32 = 18 * 60;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Local time-of-day settings.
    pub clock: ClockConfig,
    /// Storage call limits.
    pub storage: StorageConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Time-of-day configuration. Schedules are matched in this offset.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Offset from UTC in minutes, east positive.
    pub utc_offset_minutes: i32,
}

/// Storage call limits.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Deadline for each storage call, in milliseconds.
    pub timeout_ms: u64,
}

impl Config {
    /// Load configuration from `pumpctl.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("pumpctl.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("PUMPCTL_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("PUMPCTL_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("PUMPCTL_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("PUMPCTL_DATABASE_URL") {
            self.database.url = val;
        }
        if let Ok(val) = std::env::var("PUMPCTL_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("PUMPCTL_UTC_OFFSET_MINUTES") {
            if let Ok(minutes) = val.parse() {
                self.clock.utc_offset_minutes = minutes;
            }
        }
        if let Ok(val) = std::env::var("PUMPCTL_STORAGE_TIMEOUT_MS") {
            if let Ok(ms) = val.parse() {
                self.storage.timeout_ms = ms;
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.storage.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "storage timeout must be non-zero".to_string(),
            ));
        }
        self.utc_offset()?;
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Offset in which schedules are matched and sample times labelled.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when the offset is beyond ±18 hours.
    pub fn utc_offset(&self) -> Result<FixedOffset, ConfigError> {
        let minutes = self.clock.utc_offset_minutes;
        if minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(ConfigError::Validation(format!(
                "utc offset must be within ±18h, got {minutes} minutes"
            )));
        }
        FixedOffset::east_opt(minutes * 60).ok_or_else(|| {
            ConfigError::Validation(format!("invalid utc offset of {minutes} minutes"))
        })
    }

    /// Deadline applied to every storage call.
    #[must_use]
    pub fn storage_timeout(&self) -> Duration {
        Duration::from_millis(self.storage.timeout_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:pumpctl.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "pumpctld=info,pumpctl=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { timeout_ms: 2_000 }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
