//! Repository trait definitions.

use crate::Tx;
use async_trait::async_trait;
use roster_core::{NewUser, Page, PageRequest, RosterResult, User, UserId};

/// User repository trait.
///
/// Reads borrow a pooled connection per call. Writes run on the caller's
/// transaction so the caller decides when to commit.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>>;

    /// Finds the user with the smallest id among those with this name.
    async fn find_first_by_name(&self, name: &str) -> RosterResult<Option<User>>;

    /// Counts all users.
    async fn count(&self) -> RosterResult<u64>;

    /// Finds one page of users, ordered by id ascending.
    async fn find_page(&self, page: PageRequest) -> RosterResult<Page<User>>;

    /// Inserts a user and returns it with its generated id.
    ///
    /// Fails with `DuplicateEmail` if the email is already taken.
    async fn insert(&self, tx: &mut Tx, user: &NewUser) -> RosterResult<User>;
}
