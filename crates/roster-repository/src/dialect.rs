//! SQL dialect selection.

use roster_core::{RosterError, RosterResult};
use std::fmt;

/// SQL flavour spoken by the connected store, chosen from the URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlDialect {
    /// MySQL / MariaDB (`mysql://`).
    MySql,
    /// SQLite (`sqlite:`), used for embedded stores and tests.
    Sqlite,
}

impl SqlDialect {
    /// Resolves the dialect from a database URL.
    pub fn from_url(url: &str) -> RosterResult<Self> {
        match url.split_once(':').map(|(scheme, _)| scheme) {
            Some("mysql") => Ok(Self::MySql),
            Some("sqlite") => Ok(Self::Sqlite),
            other => Err(RosterError::configuration(format!(
                "Unsupported database URL scheme: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }

    /// Idempotent DDL for the `users` table.
    #[must_use]
    pub const fn create_users_table(self) -> &'static str {
        match self {
            Self::MySql => {
                "CREATE TABLE IF NOT EXISTS users (\
                 id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY, \
                 email VARCHAR(100) NOT NULL, \
                 password VARCHAR(100) NOT NULL, \
                 name VARCHAR(100) NOT NULL, \
                 UNIQUE (email))"
            }
            Self::Sqlite => {
                "CREATE TABLE IF NOT EXISTS users (\
                 id INTEGER PRIMARY KEY AUTOINCREMENT, \
                 email VARCHAR(100) NOT NULL, \
                 password VARCHAR(100) NOT NULL, \
                 name VARCHAR(100) NOT NULL, \
                 UNIQUE (email))"
            }
        }
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MySql => write!(f, "mysql"),
            Self::Sqlite => write!(f, "sqlite"),
        }
    }
}
