//! Net worth core - domain entities, services, and traits.
//!
//! This crate contains the business logic of the tracker: asset entries,
//! allocation breakdowns, and the allowlist auth gate. It is database-agnostic
//! and defines traits that are implemented by the `storage-sqlite` and
//! `identity` crates.

pub mod auth;
pub mod entries;
pub mod errors;
pub mod portfolio;
pub mod utils;

pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
