//! User service trait definition.

use crate::dto::RegisterUserRequest;
use async_trait::async_trait;
use roster_core::{RosterResult, User, UserId};

/// User service trait.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Registers a new user in a single transaction.
    ///
    /// Fails with `Validation` for malformed input and `DuplicateEmail` when
    /// the email is taken. Nothing is written on failure.
    async fn register(&self, request: RegisterUserRequest) -> RosterResult<User>;

    /// Gets a user by ID.
    async fn get_user_by_id(&self, id: UserId) -> RosterResult<User>;

    /// Gets the user with the smallest id among those with this name.
    async fn get_user_by_name(&self, name: &str) -> RosterResult<User>;

    /// Counts all users.
    async fn count_users(&self) -> RosterResult<u64>;

    /// Lists one page of users (1-based), ordered by id.
    ///
    /// Page 0 and pages past the end are empty.
    async fn get_users(&self, page: usize) -> RosterResult<Vec<User>>;
}
