//! User service implementation.

use crate::dto::RegisterUserRequest;
use crate::user_service::UserService;
use async_trait::async_trait;
use roster_core::{NewUser, PageRequest, RosterError, RosterResult, User, UserId, ValidateExt};
use roster_repository::{in_transaction, DatabasePool, UserRepository};
use std::sync::Arc;
use tracing::{debug, info};

/// User service over a repository and the pool its transactions run on.
pub struct UserServiceImpl<R: UserRepository> {
    pool: Arc<DatabasePool>,
    user_repository: Arc<R>,
    page_size: usize,
}

impl<R: UserRepository> UserServiceImpl<R> {
    /// Creates a new user service with the default page size.
    pub fn new(pool: Arc<DatabasePool>, user_repository: Arc<R>) -> Self {
        Self {
            pool,
            user_repository,
            page_size: PageRequest::DEFAULT_SIZE,
        }
    }

    /// Overrides the number of users returned per page.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.clamp(1, PageRequest::MAX_SIZE);
        self
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }
}

#[async_trait]
impl<R: UserRepository + 'static> UserService for UserServiceImpl<R> {
    async fn register(&self, request: RegisterUserRequest) -> RosterResult<User> {
        debug!("Registering user: {}", request.email);

        request.validate_request()?;

        let new_user = NewUser::from(request);
        let repository = Arc::clone(&self.user_repository);
        let user = in_transaction(&self.pool, move |tx| {
            Box::pin(async move { repository.insert(tx, &new_user).await })
        })
        .await?;

        info!("User registered: {}", user.id);
        Ok(user)
    }

    async fn get_user_by_id(&self, id: UserId) -> RosterResult<User> {
        debug!("Getting user: {}", id);

        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| RosterError::not_found("User", id))
    }

    async fn get_user_by_name(&self, name: &str) -> RosterResult<User> {
        debug!("Getting user by name: {}", name);

        self.user_repository
            .find_first_by_name(name)
            .await?
            .ok_or_else(|| RosterError::not_found("User", name))
    }

    async fn count_users(&self) -> RosterResult<u64> {
        self.user_repository.count().await
    }

    async fn get_users(&self, page: usize) -> RosterResult<Vec<User>> {
        debug!("Listing users, page: {}, size: {}", page, self.page_size);

        let users = self
            .user_repository
            .find_page(PageRequest::new(page, self.page_size))
            .await?;
        Ok(users.into_content())
    }
}

impl<R: UserRepository> std::fmt::Debug for UserServiceImpl<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl")
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}
