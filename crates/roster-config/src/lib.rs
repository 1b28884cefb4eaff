//! # Roster Config
//!
//! Configuration management for the Roster user store.
//! Supports layered configuration from files and environment variables,
//! validated up front so bad connection settings fail at startup.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;
