//! setvault engine - Orchestration layer
//!
//! Runs the export path (extract, write) and the import path (locate, read,
//! import) over the store crate, and owns operation-level logging.

pub mod commands;
pub mod version;
