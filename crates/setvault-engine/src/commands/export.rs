//! Export pipeline: extract a set and write it as a snapshot.
//!
//! ## Steps
//!
//! 1. Validate the set name (it becomes a directory and file prefix)
//! 2. Capture the snapshot stamp once
//! 3. Resolve the runner version
//! 4. Extract the aggregate by `(name, version)`
//! 5. Write the four artifacts under `<base>/<name>/<stamp>`
//!
//! The store is never written. A write failure leaves whatever artifacts
//! were already written in place.

#![allow(clippy::result_large_err)]

use crate::version::{resolve_version, VersionSource};
use rusqlite::Connection;
use setvault_core::stamp::validate_set_name;
use setvault_core::{log_op_end, log_op_error, log_op_start, SnapshotStamp};
use setvault_store::archive::write_snapshot;
use setvault_store::errors::Result;
use setvault_store::extract_set;
use std::path::PathBuf;

/// Plain-value inputs for an export
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Snapshot base directory
    pub base_dir: PathBuf,
    pub set_name: String,
}

/// What an export produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// `<base>/<name>/<stamp>`
    pub dir: PathBuf,
    pub stamp: SnapshotStamp,
    pub set_id: i64,
    pub version: String,
    pub connections: usize,
    pub patcher_instances: usize,
    pub presets: usize,
}

/// Export the set named in `config` for the version `versions` reports
///
/// ## Errors
///
/// - `ExErrorKind::InvalidInput`: bad set name, or no version could be resolved
/// - `ExErrorKind::NotFound`: no set with that name and version
/// - `ExErrorKind::Persistence`: a query failed
/// - `ExErrorKind::Io` / `ExErrorKind::Serialization`: writing the snapshot failed
pub fn export_set(
    conn: &mut Connection,
    config: &ExportConfig,
    versions: &dyn VersionSource,
) -> Result<ExportReport> {
    log_op_start!("export_set", set_name = config.set_name.as_str());
    let start = std::time::Instant::now();

    let report = export_set_impl(conn, config, versions).map_err(|e| {
        log_op_error!(
            "export_set",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            set_name = config.set_name.as_str()
        );
        e
    })?;

    log_op_end!(
        "export_set",
        duration_ms = start.elapsed().as_millis() as u64,
        set_name = config.set_name.as_str(),
        set_id = report.set_id,
        snapshot_dir = %report.dir.display()
    );

    Ok(report)
}

fn export_set_impl(
    conn: &mut Connection,
    config: &ExportConfig,
    versions: &dyn VersionSource,
) -> Result<ExportReport> {
    validate_set_name(&config.set_name)?;
    let stamp = SnapshotStamp::now_local();
    let version = resolve_version(versions)?;

    let aggregate = extract_set(conn, &config.set_name, &version)?;
    let dir = write_snapshot(&aggregate, &config.base_dir, &config.set_name, &stamp)?;

    let (connections, patcher_instances, presets) = aggregate.child_counts();
    Ok(ExportReport {
        dir,
        stamp,
        set_id: aggregate.set.id,
        version,
        connections,
        patcher_instances,
        presets,
    })
}
