//! # Roster Repository
//!
//! Data access for the `users` table:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository>  (domain interface)
//! SqlUserRepository             (SQLx, `?` placeholders)
//!   ↓  Arc<DatabasePool>        (AnyPool, dialect from URL scheme)
//! MySQL | SQLite
//! ```
//!
//! [`SchemaInitializer`] creates the table before first use and
//! [`in_transaction`] scopes writes to a single commit or rollback.

pub mod dialect;
pub mod pool;
pub mod schema;
pub mod sql;
pub mod traits;
pub mod transaction;

pub use dialect::SqlDialect;
pub use pool::*;
pub use schema::SchemaInitializer;
pub use sql::SqlUserRepository;
pub use traits::*;
pub use transaction::{in_transaction, Tx};
