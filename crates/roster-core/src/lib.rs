//! # Roster Core
//!
//! Core types, errors, and pagination primitives for the Roster user store.
//! Every other crate in the workspace builds on the abstractions here.

pub mod domain;
pub mod error;
pub mod id;
pub mod pagination;
pub mod result;
pub mod telemetry;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use pagination::*;
pub use result::*;
pub use validation::*;
