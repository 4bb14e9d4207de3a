//! Snapshot locator
//!
//! Resolves which snapshot directory to restore: an explicit stamp, or the
//! most recent one for the set.

#![allow(clippy::result_large_err)]

use crate::archive::listing::scan_set_dir;
use crate::errors::{snapshot_not_found, Result};
use setvault_core::errors::{ExError, ExErrorKind};
use setvault_core::SnapshotStamp;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// How "most recent" is decided when no stamp is given
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SnapshotOrdering {
    /// Latest directory modification time
    #[default]
    ModifiedTime,
    /// Greatest stamp parsed from the directory name; modification time is
    /// used only when no directory name parses
    NameTimestamp,
}

/// A resolved snapshot directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedSnapshot {
    pub dir: PathBuf,
    /// Directory name; used verbatim in the restored set name
    pub stamp: String,
}

/// Resolve the snapshot directory for `name`
///
/// With `stamp`, the directory `<base>/<name>/<stamp>` must exist. Without
/// it, the most recent subdirectory of `<base>/<name>` is chosen according to
/// `ordering`.
///
/// ## Errors
///
/// - `ExErrorKind::NotFound`: the directory does not exist, or there is no
///   candidate subdirectory
/// - `ExErrorKind::InvalidInput`: `stamp` is not a single path component
pub fn locate_snapshot(
    base: &Path,
    name: &str,
    stamp: Option<&str>,
    ordering: SnapshotOrdering,
) -> Result<LocatedSnapshot> {
    let set_dir = base.join(name);

    if let Some(stamp) = stamp {
        if stamp.is_empty() || stamp == "." || stamp == ".." || stamp.contains(['/', '\\']) {
            return Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("locate_snapshot")
                .with_entity_id(stamp)
                .with_message("timestamp must be a single directory name"));
        }
        let dir = set_dir.join(stamp);
        if !dir.is_dir() {
            return Err(snapshot_not_found(&dir));
        }
        return Ok(LocatedSnapshot {
            dir,
            stamp: stamp.to_string(),
        });
    }

    let candidates = scan_set_dir(&set_dir).ok_or_else(|| snapshot_not_found(&set_dir))?;

    let chosen = match ordering {
        SnapshotOrdering::ModifiedTime => latest_by_mtime(candidates),
        SnapshotOrdering::NameTimestamp => latest_by_name(candidates),
    };

    let (stamp, dir) = chosen.ok_or_else(|| snapshot_not_found(&set_dir))?;

    tracing::debug!(
        stamp = stamp.as_str(),
        ordering = ?ordering,
        "Resolved most recent snapshot"
    );

    Ok(LocatedSnapshot { dir, stamp })
}

type Candidate = (String, PathBuf, Option<SystemTime>);

fn latest_by_mtime(candidates: Vec<Candidate>) -> Option<(String, PathBuf)> {
    candidates
        .into_iter()
        .max_by(|a, b| a.2.cmp(&b.2).then_with(|| a.0.cmp(&b.0)))
        .map(|(name, dir, _)| (name, dir))
}

fn latest_by_name(candidates: Vec<Candidate>) -> Option<(String, PathBuf)> {
    let stamped = candidates
        .iter()
        .filter_map(|(name, dir, _)| {
            name.parse::<SnapshotStamp>()
                .ok()
                .map(|stamp| (stamp, name, dir))
        })
        .max_by(|a, b| a.0.cmp(&b.0))
        .map(|(_, name, dir)| (name.clone(), dir.clone()));

    stamped.or_else(|| latest_by_mtime(candidates))
}
