//! Domain entities for Roster.

pub mod user;

pub use user::{NewUser, User};
