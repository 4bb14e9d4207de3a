//! Migration framework
//!
//! Provides:
//! - Migration runner with checksums
//! - Idempotent application
//! - Embedded SQL migrations
//!
//! The set tables belong to the runner; these migrations only create them
//! where they are missing (fresh staging databases and tests).

mod checksums;
mod embedded;
mod runner;

pub use runner::{apply_migrations, applied_migrations};
