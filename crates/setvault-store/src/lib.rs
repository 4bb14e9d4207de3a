//! setvault store - SQLite and filesystem persistence for set snapshots
//!
//! Provides:
//! - Connection helpers and the embedded schema migrations
//! - Row-level access to the four set tables
//! - Extraction of a set aggregate by natural key
//! - Transactional import of an aggregate under a fresh identity
//! - The on-disk snapshot archive (write, locate, read, list)

pub mod archive;
pub mod db;
pub mod errors;
pub mod extract;
pub mod import;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use errors::Result;
pub use extract::extract_set;
pub use import::{import_aggregate, ImportOptions, ImportReport};
