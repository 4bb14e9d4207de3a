//! Import pipeline: restore a snapshot as a new set.
//!
//! ## Steps
//!
//! 1. Validate the set name and capture "now" once
//! 2. Locate the snapshot (explicit stamp, or most recent per ordering)
//! 3. Read the artifacts; the set artifact is required
//! 4. Resolve the new name: explicit, or `{set name}_{stamp}_restored_{now}`
//!    where the set name is the one recorded in the snapshot. It must be
//!    non-empty and differ from that recorded name
//! 5. Import in one transaction under a fresh set identity
//!
//! Nothing touches the store before step 5.

#![allow(clippy::result_large_err)]

use rusqlite::Connection;
use setvault_core::stamp::validate_set_name;
use setvault_core::{
    log_op_end, log_op_error, log_op_start, restored_set_name, validate_new_set_name,
    SnapshotStamp,
};
use setvault_store::archive::{locate_snapshot, read_snapshot, SnapshotOrdering};
use setvault_store::errors::Result;
use setvault_store::{import_aggregate, ImportOptions, ImportReport};
use std::path::PathBuf;

/// Plain-value inputs for an import
#[derive(Debug, Clone, Default)]
pub struct ImportConfig {
    /// Snapshot base directory
    pub base_dir: PathBuf,
    /// Set name the snapshot was exported under
    pub set_name: String,
    /// Snapshot directory name; most recent when `None`
    pub timestamp: Option<String>,
    /// Name for the restored set; generated when `None`. Any non-empty value
    /// other than the snapshot's own set name is accepted
    pub new_name: Option<String>,
    pub ordering: SnapshotOrdering,
    pub dry_run: bool,
}

/// What an import did (or would have done, in dry-run)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    pub snapshot_dir: PathBuf,
    /// Snapshot directory name as resolved
    pub source_stamp: String,
    /// Identity the snapshot's set row had when exported
    pub original_set_id: i64,
    pub report: ImportReport,
}

/// Restore the snapshot described by `config`
///
/// ## Errors
///
/// - `ExErrorKind::InvalidInput`: bad set name, new name or timestamp
/// - `ExErrorKind::NotFound`: no such snapshot, or its set artifact is missing
/// - `ExErrorKind::Io` / `ExErrorKind::Serialization`: an artifact could not be read
/// - `ExErrorKind::Persistence`: an insert failed; nothing was kept
/// - `ExErrorKind::PartialImport`: an insert failed and rollback failed
pub fn import_set(conn: &mut Connection, config: &ImportConfig) -> Result<ImportOutcome> {
    log_op_start!(
        "import_set",
        set_name = config.set_name.as_str(),
        dry_run = config.dry_run
    );
    let start = std::time::Instant::now();

    let outcome = import_set_impl(conn, config).map_err(|e| {
        log_op_error!(
            "import_set",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            set_name = config.set_name.as_str()
        );
        e
    })?;

    log_op_end!(
        "import_set",
        duration_ms = start.elapsed().as_millis() as u64,
        set_name = config.set_name.as_str(),
        new_set_id = outcome.report.new_set_id,
        new_set_name = outcome.report.new_set_name.as_str(),
        presets_len = outcome.report.presets
    );

    Ok(outcome)
}

fn import_set_impl(conn: &mut Connection, config: &ImportConfig) -> Result<ImportOutcome> {
    validate_set_name(&config.set_name)?;
    let now = SnapshotStamp::now_local();

    let located = locate_snapshot(
        &config.base_dir,
        &config.set_name,
        config.timestamp.as_deref(),
        config.ordering,
    )?;
    let aggregate = read_snapshot(&located.dir, &config.set_name)?;

    let new_name = match &config.new_name {
        Some(name) => name.clone(),
        None => restored_set_name(&aggregate.set.name, &located.stamp, &now),
    };
    validate_new_set_name(&new_name, &aggregate.set.name)?;

    let report = import_aggregate(
        conn,
        &aggregate,
        &new_name,
        &ImportOptions {
            dry_run: config.dry_run,
        },
    )?;

    Ok(ImportOutcome {
        snapshot_dir: located.dir,
        source_stamp: located.stamp,
        original_set_id: aggregate.set.id,
        report,
    })
}
