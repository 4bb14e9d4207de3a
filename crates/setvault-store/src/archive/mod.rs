//! On-disk snapshot archive
//!
//! Layout:
//!
//! ```text
//! <base>/<set name>/<YYYYMMDD-HHMMSS>/<set name>_set.json
//!                                    /<set name>_connections.json
//!                                    /<set name>_patcher_instances.json
//!                                    /<set name>_presets.json
//! ```
//!
//! Provides:
//! - Writing the four artifacts of an aggregate
//! - Locating a snapshot by explicit stamp or as the most recent one
//! - Reading the artifacts back into an aggregate
//! - Listing the snapshots held for a set

mod listing;
mod locator;
mod reader;
mod writer;

pub use listing::{list_snapshots, SnapshotEntry};
pub use locator::{locate_snapshot, LocatedSnapshot, SnapshotOrdering};
pub use reader::read_snapshot;
pub use writer::{snapshot_dir, write_snapshot};
