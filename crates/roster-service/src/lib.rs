//! # Roster Service
//!
//! User registration and lookups on top of the repository layer.
//! `register` is the only operation that opens a transaction.

pub mod dto;
pub mod r#impl;
pub mod user_service;

pub use dto::*;
pub use r#impl::UserServiceImpl;
pub use user_service::*;
