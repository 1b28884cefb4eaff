//! Server startup utilities.

use roster_core::{RosterResult, User};
use roster_repository::DatabasePool;
use roster_service::UserService;
use tracing::{info, warn};

/// Name looked up by the demo run.
pub const DEMO_USER_NAME: &str = "Bob";

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    ____             __
   / __ \____  _____/ /____  _____
  / /_/ / __ \/ ___/ __/ _ \/ ___/
 / _, _/ /_/ (__  ) /_/  __/ /
/_/ |_|\____/____/\__/\___/_/
    "#);
}

/// Prints connection pool information.
pub fn print_startup_info(environment: &str, pool: &DatabasePool) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("Environment: {}", environment);
    info!("Database:    {}", pool.dialect());
    info!("Pool:        {:?}", pool);
    info!("{}", separator);
}

/// Results of the demo run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoReport {
    /// The first user named [`DEMO_USER_NAME`], if any.
    pub named_user: Option<User>,
    /// Total number of users.
    pub total: u64,
    /// The first page of users.
    pub first_page: Vec<User>,
}

/// Looks up [`DEMO_USER_NAME`], counts the users and reads the first page.
///
/// A missing demo user is logged, not returned as an error.
pub async fn run_demo(service: &dyn UserService) -> RosterResult<DemoReport> {
    let named_user = match service.get_user_by_name(DEMO_USER_NAME).await {
        Ok(user) => Some(user),
        Err(e) if e.is_not_found() => {
            warn!("No user named {}", DEMO_USER_NAME);
            None
        }
        Err(e) => return Err(e),
    };

    let total = service.count_users().await?;
    let first_page = service.get_users(1).await?;

    Ok(DemoReport {
        named_user,
        total,
        first_page,
    })
}
