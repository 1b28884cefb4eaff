//! Application configuration structures.

use roster_core::telemetry::TelemetryConfig;
use roster_core::{RosterError, RosterResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use url::Url;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// Connection settings. Config layers may also spell the section `jdbc`.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, test, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "roster".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// URL schemes the connection pool can open.
pub const SUPPORTED_SCHEMES: &[&str] = &["mysql", "sqlite"];

/// Database connection and pool configuration.
///
/// `url`, `username` and `password` have no defaults; each must be supplied
/// by a config file or the environment.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database URL (`mysql://host:port/db` or `sqlite://path`).
    pub url: Option<String>,
    /// Login user. Merged into MySQL URLs; unused by SQLite.
    pub username: Option<String>,
    /// Login password. May be empty, but must be present.
    pub password: Option<String>,
    /// Statements outside an explicit transaction commit immediately.
    pub auto_commit: bool,
    /// Minimum number of pooled connections kept open.
    pub min_connections: u32,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
    /// How long an acquisition may wait for a free connection, in seconds.
    pub connect_timeout_secs: u64,
    /// Idle connections older than this are closed, in seconds.
    pub idle_timeout_secs: u64,
    /// Enable SQL statement logging.
    pub log_queries: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            username: None,
            password: None,
            auto_commit: true,
            min_connections: 1,
            max_connections: 10,
            connect_timeout_secs: 5,
            idle_timeout_secs: 60,
            log_queries: false,
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("auto_commit", &self.auto_commit)
            .field("min_connections", &self.min_connections)
            .field("max_connections", &self.max_connections)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("idle_timeout_secs", &self.idle_timeout_secs)
            .field("log_queries", &self.log_queries)
            .finish()
    }
}

impl DatabaseConfig {
    /// Creates a configuration with the three required settings and default pool tuning.
    #[must_use]
    pub fn new(url: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            username: Some(username.into()),
            password: Some(password.into()),
            ..Self::default()
        }
    }

    /// Returns the acquisition timeout as a Duration.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Returns the idle timeout as a Duration.
    #[must_use]
    pub const fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Returns the URL scheme (`mysql`, `sqlite`, ...), if a URL is set.
    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        self.url
            .as_deref()
            .and_then(|url| url.split_once(':'))
            .map(|(scheme, _)| scheme)
    }

    /// Builds the URL handed to the driver, with credentials applied.
    ///
    /// MySQL URLs get `username`/`password` written into their authority,
    /// replacing anything already there. SQLite URLs are returned unchanged.
    pub fn connection_url(&self) -> RosterResult<String> {
        let raw = self
            .url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| RosterError::configuration("database.url is required"))?;
        let username = self
            .username
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| RosterError::configuration("database.username is required"))?;
        let password = self
            .password
            .as_deref()
            .ok_or_else(|| RosterError::configuration("database.password is required"))?;

        match self.scheme() {
            Some("sqlite") => Ok(raw.to_string()),
            Some("mysql") => {
                let mut url = Url::parse(raw)
                    .map_err(|e| RosterError::configuration(format!("Invalid database URL: {}", e)))?;
                url.set_username(username)
                    .map_err(|()| RosterError::configuration("Database URL cannot carry a username"))?;
                url.set_password((!password.is_empty()).then_some(password))
                    .map_err(|()| RosterError::configuration("Database URL cannot carry a password"))?;
                Ok(url.into())
            }
            other => Err(RosterError::configuration(format!(
                "Unsupported database URL scheme: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }
}
