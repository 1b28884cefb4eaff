//! User entity.

use crate::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length, in characters, of every `users` text column.
pub const MAX_FIELD_LEN: usize = 100;

/// A registered account, as stored in the `users` table.
///
/// Values are snapshots: there is no update path, so a `User` read back from
/// the store compares equal to the one `register` returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned primary key.
    pub id: UserId,

    /// Unique email address.
    pub email: String,

    /// Password exactly as supplied at registration (never serialized).
    #[serde(skip_serializing, default)]
    pub password: String,

    /// Display name; not unique.
    pub name: String,
}

impl User {
    /// Creates a user snapshot from stored values.
    #[must_use]
    pub fn new(id: UserId, email: String, password: String, name: String) -> Self {
        Self {
            id,
            email,
            password,
            name,
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User[id={}, email={}, name={}]", self.id, self.email, self.name)
    }
}

/// Values for a row that has not been inserted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl NewUser {
    /// Creates insert values.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: name.into(),
        }
    }
}
