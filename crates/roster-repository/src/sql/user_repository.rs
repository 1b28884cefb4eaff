//! SQLx user repository implementation.

use crate::{traits::UserRepository, DatabasePool, Tx};
use async_trait::async_trait;
use roster_core::{NewUser, Page, PageRequest, RosterError, RosterResult, User, UserId};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// User repository over the shared connection pool.
///
/// Queries use `?` placeholders, which MySQL and SQLite both accept.
#[derive(Clone)]
pub struct SqlUserRepository {
    pool: Arc<DatabasePool>,
}

impl SqlUserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password: String,
    name: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::new(UserId::from_raw(row.id), row.email, row.password, row.name)
    }
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>("SELECT id, email, password, name FROM users WHERE id = ?")
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row.map(User::from))
    }

    async fn find_first_by_name(&self, name: &str) -> RosterResult<Option<User>> {
        debug!("Finding user by name: {}", name);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password, name
            FROM users
            WHERE name = ?
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(User::from))
    }

    async fn count(&self) -> RosterResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool.inner())
            .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn find_page(&self, page: PageRequest) -> RosterResult<Page<User>> {
        debug!("Finding users, page: {}, size: {}", page.page, page.size);

        let total = self.count().await?;
        if page.is_out_of_range() {
            return Ok(Page::empty(page, total));
        }

        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password, name
            FROM users
            ORDER BY id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(to_i64(page.limit()))
        .bind(to_i64(page.offset()))
        .fetch_all(self.pool.inner())
        .await?;

        let users: Vec<User> = rows.into_iter().map(User::from).collect();
        Ok(Page::new(users, page.page, page.size, total))
    }

    async fn insert(&self, tx: &mut Tx, user: &NewUser) -> RosterResult<User> {
        debug!("Inserting user: {}", user.email);

        // No RETURNING on MySQL, and the Any driver reports no generated id
        // for SQLite. Email is unique, so re-select by it within the same transaction.
        sqlx::query("INSERT INTO users (email, password, name) VALUES (?, ?, ?)")
            .bind(&user.email)
            .bind(&user.password)
            .bind(&user.name)
            .execute(&mut **tx)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    RosterError::DuplicateEmail(user.email.clone())
                }
                other => RosterError::from(other),
            })?;

        let row = sqlx::query_as::<_, UserRow>("SELECT id, email, password, name FROM users WHERE email = ?")
            .bind(&user.email)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| RosterError::internal("Failed to fetch inserted user"))?;

        Ok(row.into())
    }
}

impl std::fmt::Debug for SqlUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlUserRepository").finish_non_exhaustive()
    }
}
