//! Typed ID wrappers for domain entities.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::num::ParseIntError;
use std::str::FromStr;

/// A strongly-typed wrapper for user IDs.
///
/// User IDs are assigned by the store on insert and never change afterwards,
/// so there is deliberately no way to mint a fresh one in process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    /// Wraps a raw store-assigned key.
    #[must_use]
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw key.
    #[must_use]
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl From<i64> for UserId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}
