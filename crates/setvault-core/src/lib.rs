//! setvault core - aggregate model and shared rules
//!
//! This crate provides the pure, I/O-free parts of setvault:
//! - The Set aggregate (set row plus connections, patcher instances and presets)
//! - Opaque blob values that are copied but never interpreted
//! - Snapshot timestamp formatting/parsing and restored-name composition
//! - Artifact file naming for the snapshot directory layout
//! - The canonical error facility and the structured logging facility

pub mod artifact;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod stamp;

// Re-export commonly used types
pub use artifact::Artifact;
pub use errors::{ExError, ExErrorKind, Result, SetVaultError};
pub use model::{
    Blob, ConnectionRecord, PatcherInstanceRecord, PresetRecord, SetAggregate, SetRecord,
};
pub use stamp::{restored_set_name, validate_new_set_name, SnapshotStamp};
