//! Snapshot listing

#![allow(clippy::result_large_err)]

use crate::errors::{snapshot_not_found, Result};
use setvault_core::artifact::Artifact;
use setvault_core::SnapshotStamp;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// One snapshot directory under `<base>/<set name>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotEntry {
    /// Directory name as found on disk
    pub name: String,
    pub dir: PathBuf,
    /// Parsed directory name, if it is a canonical stamp
    pub stamp: Option<SnapshotStamp>,
    pub modified: Option<SystemTime>,
    /// Artifacts present for this set name
    pub artifacts: Vec<Artifact>,
}

impl SnapshotEntry {
    /// True when every mandatory artifact is present
    pub fn is_restorable(&self) -> bool {
        Artifact::ALL
            .iter()
            .filter(|a| a.is_mandatory())
            .all(|a| self.artifacts.contains(a))
    }
}

/// Immediate subdirectories of a set's snapshot directory
///
/// Non-directory entries are skipped. Entries whose metadata cannot be read
/// are kept with no modification time.
pub(crate) fn scan_set_dir(set_dir: &Path) -> Option<Vec<(String, PathBuf, Option<SystemTime>)>> {
    let entries = fs::read_dir(set_dir).ok()?;
    let mut found = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        let metadata = match fs::metadata(&path) {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        if !metadata.is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        found.push((name, path, metadata.modified().ok()));
    }
    Some(found)
}

/// List every snapshot held for `name`, sorted by directory name
///
/// ## Errors
///
/// - `ExErrorKind::NotFound`: `<base>/<name>` does not exist or cannot be read
pub fn list_snapshots(base: &Path, name: &str) -> Result<Vec<SnapshotEntry>> {
    let set_dir = base.join(name);
    let scanned = scan_set_dir(&set_dir).ok_or_else(|| snapshot_not_found(&set_dir))?;

    let mut entries: Vec<SnapshotEntry> = scanned
        .into_iter()
        .map(|(dir_name, dir, modified)| {
            let artifacts = Artifact::ALL
                .into_iter()
                .filter(|a| dir.join(a.file_name(name)).is_file())
                .collect();
            SnapshotEntry {
                stamp: dir_name.parse().ok(),
                name: dir_name,
                dir,
                modified,
                artifacts,
            }
        })
        .collect();

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}
