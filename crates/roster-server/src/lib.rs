//! # Roster Server Library
//!
//! Explicit startup wiring for the Roster user store: configuration in,
//! connection pool, schema, repository and service out.

pub mod app;
pub mod startup;

pub use app::{AppBuilder, Application};
pub use startup::{run_demo, DemoReport};
