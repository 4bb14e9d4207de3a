//! Repository layer for the four set tables
//!
//! Maps rows to the aggregate records in setvault-core and back

pub mod sqlite_repo;

pub use sqlite_repo::{ChildTable, SetRepo};
