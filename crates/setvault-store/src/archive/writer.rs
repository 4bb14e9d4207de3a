//! Snapshot writer
//!
//! Writes each artifact with a plain `fs::write`. A failure part-way leaves
//! the artifacts already written in place for inspection.

#![allow(clippy::result_large_err)]

use crate::errors::{encode_error, io_error, Result};
use serde::Serialize;
use setvault_core::artifact::Artifact;
use setvault_core::{SetAggregate, SnapshotStamp};
use std::fs;
use std::path::{Path, PathBuf};

/// `<base>/<name>/<stamp>`
pub fn snapshot_dir(base: &Path, name: &str, stamp: &SnapshotStamp) -> PathBuf {
    base.join(name).join(stamp.to_string())
}

/// Write `aggregate` under `<base>/<name>/<stamp>` and return that directory
///
/// Re-running within the same second reuses (and overwrites) the directory.
///
/// ## Errors
///
/// - `ExErrorKind::Io`: directory creation or a file write failed
/// - `ExErrorKind::Serialization`: an artifact could not be encoded
pub fn write_snapshot(
    aggregate: &SetAggregate,
    base: &Path,
    name: &str,
    stamp: &SnapshotStamp,
) -> Result<PathBuf> {
    let dir = snapshot_dir(base, name, stamp);
    fs::create_dir_all(&dir).map_err(|e| io_error("create_snapshot_dir", &dir, e))?;

    write_artifact(&dir, name, Artifact::Set, &aggregate.set)?;
    write_artifact(&dir, name, Artifact::Connections, &aggregate.connections)?;
    write_artifact(
        &dir,
        name,
        Artifact::PatcherInstances,
        &aggregate.patcher_instances,
    )?;
    write_artifact(&dir, name, Artifact::Presets, &aggregate.presets)?;

    tracing::debug!(dir = %dir.display(), "Wrote snapshot artifacts");

    Ok(dir)
}

fn write_artifact<T: Serialize + ?Sized>(
    dir: &Path,
    name: &str,
    artifact: Artifact,
    value: &T,
) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).map_err(|e| encode_error(artifact, e))?;
    let path = dir.join(artifact.file_name(name));
    fs::write(&path, bytes).map_err(|e| io_error("write_artifact", &path, e))?;
    Ok(())
}
